//! File operations for opening and saving point documents.
//!
//! Native dialogs run on the tokio runtime and report the chosen path back through
//! the channel in [`FileState`](super::state::FileState). Reading, parsing and
//! writing happen on the UI thread once the path arrives, so the document is only
//! ever touched there.

use super::state::{
    ConfirmChoice, FileOperationResult, PendingConfirmAction, PendingSaveOperation, TourCanvasApp,
};
use eframe::egui;
use log::{error, info, warn};
use std::path::Path;

impl TourCanvasApp {
    /// Handles completed dialog results and starts newly requested dialogs.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for requesting repaints
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.file.file_operation_receiver.try_recv() {
            match result {
                FileOperationResult::SavePathChosen(path) => self.save_to(&path),
                FileOperationResult::SaveDialogCancelled => {
                    if let Some(action) = self.file.after_save_action.take() {
                        info!("Save dialog closed; dropping deferred {action:?}");
                    }
                }
                FileOperationResult::OpenPathChosen(path) => self.open_from(&path),
                FileOperationResult::ExportCompleted(path) => {
                    info!("Exported image to {}", path.display());
                    self.set_status(format!("Exported {}", path.display()));
                }
                FileOperationResult::OperationFailed(message) => {
                    error!("File operation failed: {message}");
                    self.set_status(message);
                }
            }
        }

        if let Some(save_op) = self.file.pending_save_operation.take() {
            let current = self.editor.document.current_path.clone();
            match (save_op, current) {
                (PendingSaveOperation::Save, Some(path)) => self.save_to(&path),
                _ => self.spawn_save_dialog(ctx),
            }
        }

        if std::mem::take(&mut self.file.pending_load) {
            self.spawn_open_dialog(ctx);
        }

        if let Some(export) = self.file.pending_export.take() {
            self.export_image(ctx, export);
        }
    }

    /// Clears the document after a "New" request.
    pub fn new_document(&mut self) {
        self.editor.new_document();
        self.set_status("New document");
    }

    /// Starts a new document, asking first if the current one has unsaved changes.
    pub fn request_new(&mut self) {
        self.run_or_confirm(PendingConfirmAction::New);
    }

    /// Requests the open dialog, asking first if the document has unsaved changes.
    pub fn request_open(&mut self) {
        self.run_or_confirm(PendingConfirmAction::Open);
    }

    fn run_or_confirm(&mut self, action: PendingConfirmAction) {
        if self.editor.document.edited {
            self.file.pending_confirm_action = Some(action);
        } else {
            self.run_confirmed(action);
        }
    }

    fn run_confirmed(&mut self, action: PendingConfirmAction) {
        match action {
            PendingConfirmAction::New => self.new_document(),
            PendingConfirmAction::Open => self.file.pending_load = true,
        }
    }

    /// Applies the button picked in the unsaved-changes dialog.
    ///
    /// Saving goes to the current file, or through the save dialog when the
    /// document has none; the pending action runs only after that save succeeds.
    pub fn resolve_confirmation(&mut self, choice: ConfirmChoice) {
        let Some(action) = self.file.pending_confirm_action.take() else {
            return;
        };
        match choice {
            ConfirmChoice::ContinueWithoutSaving => self.run_confirmed(action),
            ConfirmChoice::Cancel => {}
            ConfirmChoice::Save => {
                self.file.after_save_action = Some(action);
                match self.editor.document.current_path.clone() {
                    Some(path) => self.save_to(&path),
                    None => self.file.pending_save_operation = Some(PendingSaveOperation::SaveAs),
                }
            }
        }
    }

    /// Requests a save on the next frame; falls back to a dialog without a path.
    pub fn request_save(&mut self) {
        self.file.pending_save_operation = Some(PendingSaveOperation::Save);
    }

    /// Requests the save dialog on the next frame.
    pub fn request_save_as(&mut self) {
        self.file.pending_save_operation = Some(PendingSaveOperation::SaveAs);
    }

    /// Writes the document to `path`, reporting the outcome in the footer.
    pub fn save_to(&mut self, path: &Path) {
        let deferred = self.file.after_save_action.take();
        match self.editor.save_document(path) {
            Ok(()) => {
                self.set_status(format!("Saved {}", path.display()));
                if let Some(action) = deferred {
                    self.run_confirmed(action);
                }
            }
            Err(e) => {
                if let Some(action) = deferred {
                    warn!("Save failed; not running deferred {action:?}");
                }
                self.set_status(e.to_string());
            }
        }
    }

    /// Loads the document at `path`, reporting the outcome in the footer.
    pub fn open_from(&mut self, path: &Path) {
        match self.editor.load_document(path) {
            Ok(()) => self.set_status(format!(
                "Loaded {} points from {}",
                self.editor.points.len(),
                path.display()
            )),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    fn spawn_save_dialog(&self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        let sender = self.file.file_operation_sender.clone();
        tokio::spawn(async move {
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("CSV", &["csv"])
                .set_file_name("points.csv")
                .save_file()
                .await
            {
                let _ = sender.send(FileOperationResult::SavePathChosen(handle.path().to_path_buf()));
            } else {
                let _ = sender.send(FileOperationResult::SaveDialogCancelled);
            }
            ctx.request_repaint();
        });
    }

    fn spawn_open_dialog(&self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        let sender = self.file.file_operation_sender.clone();
        tokio::spawn(async move {
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("CSV", &["csv"])
                .pick_file()
                .await
            {
                let _ = sender.send(FileOperationResult::OpenPathChosen(handle.path().to_path_buf()));
            }
            ctx.request_repaint();
        });
    }
}
