//! Canvas input handling.
//!
//! Translates egui pointer and wheel input into [`PointerEvent`]s in canvas-local
//! coordinates. Shift is the edit modifier: shift-press selects, shift-drag moves
//! the selected point, a plain drag pans.

use super::state::TourCanvasApp;
use crate::editor::PointerEvent;
use eframe::egui;

/// Wheel steps for one frame's scroll; positive rolls toward the user.
fn wheel_notches(delta_y: f32) -> i32 {
    if delta_y < 0.0 {
        1
    } else if delta_y > 0.0 {
        -1
    } else {
        0
    }
}

impl TourCanvasApp {
    /// Allocates the canvas, feeds its input to the editor and paints it.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI to place the canvas in
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.editor
            .viewport
            .set_canvas_size((f64::from(rect.width()), f64::from(rect.height())));

        for event in self.collect_pointer_events(ui, &response) {
            self.editor.handle_pointer(event);
        }

        self.paint_canvas(&painter, rect);
    }

    /// Converts this frame's input over the canvas into editor events.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn collect_pointer_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
    ) -> Vec<PointerEvent> {
        let rect = response.rect;
        let local = |p: egui::Pos2| (f64::from(p.x - rect.min.x), f64::from(p.y - rect.min.y));
        let pressed_on_canvas = &mut self.pressed_on_canvas;

        ui.input(|i| {
            let mut events = Vec::new();
            let modifier = i.modifiers.shift;
            let hover = i.pointer.hover_pos().filter(|p| rect.contains(*p));

            if !i.pointer.primary_down() {
                *pressed_on_canvas = false;
            }

            if i.pointer.primary_pressed() {
                if let Some(pos) = hover {
                    *pressed_on_canvas = true;
                    events.push(PointerEvent::Press { pos: local(pos), modifier });
                }
            } else if *pressed_on_canvas && i.pointer.delta() != egui::Vec2::ZERO {
                if let Some(pos) = i.pointer.latest_pos() {
                    events.push(PointerEvent::Drag { pos: local(pos), modifier });
                }
            } else if let Some(pos) = hover {
                if i.pointer.delta() != egui::Vec2::ZERO {
                    events.push(PointerEvent::Move { pos: local(pos) });
                }
            }

            if hover.is_some() {
                let notches = wheel_notches(i.raw_scroll_delta.y);
                if notches != 0 {
                    events.push(PointerEvent::Wheel { notches, modifier });
                }
            }
            events
        })
    }
}
