//! The egui shell around the editor core.
//!
//! # Module Organization
//!
//! - `state` - The `TourCanvasApp` struct, file-dialog bookkeeping and persisted settings
//! - `file_ops` - Native open/save dialogs for CSV documents
//! - `canvas` - Translating egui input into editor pointer events
//! - `rendering` - Painting draw commands with `egui::Painter`
//! - `export` - SVG and PNG export of the current view

mod canvas;
mod export;
mod file_ops;
mod rendering;
mod state;


pub use export::{build_svg, rasterize};
pub use state::{
    ConfirmChoice, FileOperationResult, FileState, PendingConfirmAction, PendingExportOperation,
    PendingSaveOperation, PersistedSettings, TourCanvasApp,
};

use crate::constants::{CANVAS_METRIC_STEP, MAX_CANVAS_METRIC, MAX_SCALE, MIN_CANVAS_METRIC, MIN_SCALE, SCALE_STEP};
use crate::types::ColorTag;
use eframe::egui;
use log::error;

/// Key under which settings are stored in eframe storage.
pub const STORAGE_KEY: &str = "app_state";

impl eframe::App for TourCanvasApp {
    /// Persist settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string(STORAGE_KEY, json),
            Err(err) => error!("Failed to serialize app settings: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.handle_pending_operations(ctx);
        self.handle_delete_key(ctx);
        self.sync_window(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            self.draw_footer(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        self.draw_unsaved_dialog(ctx);
    }
}

impl TourCanvasApp {
    /// Restores the stored window size once, records the current size and keeps the
    /// title in sync with the open file.
    fn sync_window(&mut self, ctx: &egui::Context) {
        if !self.applied_viewport_restore {
            if let Some((w, h)) = self.settings.window_inner_size {
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(w, h)));
            }
            self.applied_viewport_restore = true;
        }
        let size = ctx.input(|i| i.screen_rect().size());
        self.settings.window_inner_size = Some((size.x, size.y));

        let title = self.editor.window_title();
        if self.shown_title.as_deref() != Some(title.as_str()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.shown_title = Some(title);
        }
    }

    /// Asks what to do with unsaved changes before New or Open goes ahead.
    fn draw_unsaved_dialog(&mut self, ctx: &egui::Context) {
        let Some(action) = self.file.pending_confirm_action else {
            return;
        };
        let title = match action {
            PendingConfirmAction::New => "Unsaved changes: start a new document?",
            PendingConfirmAction::Open => "Unsaved changes: open another file?",
        };
        let mut choice = None;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("The current document has unsaved changes.");
                ui.horizontal(|ui| {
                    if ui.button("Continue without saving").clicked() {
                        choice = Some(ConfirmChoice::ContinueWithoutSaving);
                    }
                    if ui.button("Save").clicked() {
                        choice = Some(ConfirmChoice::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        choice = Some(ConfirmChoice::Cancel);
                    }
                });
            });
        if let Some(choice) = choice {
            self.resolve_confirmation(choice);
        }
    }

    /// Deletes the selected point on Delete, unless a text field has focus.
    fn handle_delete_key(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            self.editor.delete_selected();
        }
    }

    /// Draws the top toolbar with file, editing and tour controls.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("New").clicked() {
                self.request_new();
            }
            if ui.button("Open").clicked() {
                self.request_open();
            }
            if ui.button("Save").clicked() {
                self.request_save();
            }
            if ui.button("Save As").clicked() {
                self.request_save_as();
            }

            ui.separator();

            if ui.button("Add").clicked() {
                self.editor.add_point();
            }
            let has_selection = self.editor.interaction.selected.is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new("Delete"))
                .clicked()
            {
                self.editor.delete_selected();
            }
            self.draw_color_picker(ui);

            ui.separator();

            ui.label("Size");
            let mut diameter = self.editor.config.marker_diameter;
            if ui.add(Self::metric_spinner(&mut diameter)).changed() {
                self.editor.set_marker_diameter(diameter);
            }
            ui.label("Distance");
            let mut spacing = self.editor.config.unit_spacing;
            if ui.add(Self::metric_spinner(&mut spacing)).changed() {
                self.editor.set_unit_spacing(spacing);
            }

            ui.separator();

            if ui.button("Reset view").clicked() {
                self.editor.reset_viewport();
            }
            if ui.button("Show tour").clicked() {
                self.show_tour();
            }

            ui.separator();

            if ui.button("Export SVG").clicked() {
                self.file.pending_export = Some(PendingExportOperation::Svg);
            }
            if ui.button("Export PNG").clicked() {
                self.file.pending_export = Some(PendingExportOperation::Png);
            }
        });
    }

    fn metric_spinner(value: &mut f64) -> egui::DragValue<'_> {
        egui::DragValue::new(value)
            .range(MIN_CANVAS_METRIC..=MAX_CANVAS_METRIC)
            .speed(CANVAS_METRIC_STEP)
            .fixed_decimals(0)
    }

    /// Color combo box. Shows "none" and is disabled while nothing is selected.
    fn draw_color_picker(&mut self, ui: &mut egui::Ui) {
        let current = self.editor.interaction.color_control;
        let text = current.map_or("none", ColorTag::label);
        let mut chosen = None;
        ui.add_enabled_ui(current.is_some(), |ui| {
            egui::ComboBox::from_id_salt("color_picker")
                .selected_text(text)
                .show_ui(ui, |ui| {
                    for tag in ColorTag::ALL {
                        if ui.selectable_label(current == Some(tag), tag.label()).clicked() {
                            chosen = Some(tag);
                        }
                    }
                });
        });
        if let Some(tag) = chosen {
            self.editor.recolor_selected(tag);
        }
    }

    /// Draws the footer: cursor readout, status line and zoom controls.
    fn draw_footer(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (x, y) = self.editor.interaction.cursor_grid;
            ui.monospace(format!("x: {x:.0}  y: {y:.0}"));
            if let Some(status) = &self.file.status_message {
                ui.separator();
                ui.label(status.as_str());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Default").clicked() {
                    self.editor.reset_viewport();
                }
                if ui.button("+").clicked() {
                    self.editor.add_scale(SCALE_STEP);
                }
                let mut percent = self.editor.viewport.scale() * 100.0;
                let slider = egui::Slider::new(&mut percent, MIN_SCALE * 100.0..=MAX_SCALE * 100.0)
                    .step_by(SCALE_STEP * 100.0)
                    .show_value(false);
                if ui.add(slider).changed() {
                    self.editor.set_scale(percent / 100.0);
                }
                if ui.button("-").clicked() {
                    self.editor.add_scale(-SCALE_STEP);
                }
                ui.label(format!("{}%", self.editor.viewport.zoom_percent()));
            });
        });
    }

    /// Computes both tours and writes the ordered export, reporting in the footer.
    pub fn show_tour(&mut self) {
        match self.editor.show_tour() {
            Ok(Some(path)) => self.set_status(format!("Tour written to {}", path.display())),
            Ok(None) => self.set_status("Tour computed; save the document to export it"),
            Err(e) => {
                error!("Tour failed: {e}");
                self.set_status(e.to_string());
            }
        }
    }
}
