//! Application state for the egui shell.
//!
//! The editor core lives in [`EditorState`]; this module adds what only the window
//! needs: pending file dialogs, the result channel, a status line and the settings
//! persisted between sessions.

use crate::config::CanvasConfig;
use crate::editor::EditorState;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Represents a pending save operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingSaveOperation {
    /// Save with a new file path (show file picker)
    SaveAs,
    /// Save to the existing file path
    Save,
}

/// Represents a pending export operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingExportOperation {
    /// Vector image of the current view
    Svg,
    /// Raster image of the current view
    Png,
}

/// Actions that need approval while the document has unsaved changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirmAction {
    /// User is attempting to start a new document
    New,
    /// User is attempting to open a file
    Open,
}

/// Button picked in the unsaved-changes dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    /// Drop the changes and carry on
    ContinueWithoutSaving,
    /// Save first, then carry on once the save succeeded
    Save,
    /// Keep the document and forget the request
    Cancel,
}

/// Messages sent from async file operations back to the main app.
#[derive(Debug)]
pub enum FileOperationResult {
    /// A path was chosen in the save dialog
    SavePathChosen(PathBuf),
    /// The save dialog was closed without choosing a path
    SaveDialogCancelled,
    /// A path was chosen in the open dialog
    OpenPathChosen(PathBuf),
    /// An image export finished writing to the given path
    ExportCompleted(PathBuf),
    /// Operation failed with an error message
    OperationFailed(String),
}

/// State related to file dialogs and user feedback.
pub struct FileState {
    /// Save requested this frame, handled by `handle_pending_operations`
    pub pending_save_operation: Option<PendingSaveOperation>,
    /// Open requested this frame
    pub pending_load: bool,
    /// Image export requested this frame
    pub pending_export: Option<PendingExportOperation>,
    /// Sending half handed to dialog tasks
    pub file_operation_sender: Sender<FileOperationResult>,
    /// Receiving half drained once per frame
    pub file_operation_receiver: Receiver<FileOperationResult>,
    /// Last outcome shown in the footer
    pub status_message: Option<String>,
    /// Action waiting on the unsaved-changes dialog; the dialog shows while set
    pub pending_confirm_action: Option<PendingConfirmAction>,
    /// Action to run once the save started from the dialog succeeds
    pub after_save_action: Option<PendingConfirmAction>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            pending_save_operation: None,
            pending_load: false,
            pending_export: None,
            file_operation_sender: sender,
            file_operation_receiver: receiver,
            status_message: None,
            pending_confirm_action: None,
            after_save_action: None,
        }
    }
}

/// Settings that survive restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    /// Marker size and unit spacing
    pub canvas: CanvasConfig,
    /// Last known window inner size in logical points
    pub window_inner_size: Option<(f32, f32)>,
}

/// The main application structure.
///
/// Implements `eframe::App`; every editing operation is delegated to the
/// [`EditorState`] it owns.
#[derive(Default)]
pub struct TourCanvasApp {
    /// Points, viewport, tours and document state
    pub editor: EditorState,
    /// Dialog and status bookkeeping
    pub file: FileState,
    /// Settings persisted through eframe storage
    pub settings: PersistedSettings,
    /// Whether the stored window size was already applied this session
    pub applied_viewport_restore: bool,
    /// Title last sent to the window
    pub shown_title: Option<String>,
    /// Whether the primary button went down over the canvas and is still held
    pub pressed_on_canvas: bool,
}

impl TourCanvasApp {
    /// Creates the app from previously persisted settings.
    pub fn with_settings(settings: PersistedSettings) -> Self {
        let mut app = Self::default();
        app.editor.config = settings.canvas.sanitized();
        app.settings = settings;
        app
    }

    /// Serializes the persisted settings to JSON.
    ///
    /// # Returns
    ///
    /// A JSON string, or an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let settings = PersistedSettings {
            canvas: self.editor.config,
            window_inner_size: self.settings.window_inner_size,
        };
        serde_json::to_string_pretty(&settings)
    }

    /// Restores an app from JSON written by [`TourCanvasApp::to_json`].
    ///
    /// # Arguments
    ///
    /// * `json` - JSON string containing the serialized settings
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::with_settings)
    }

    /// Records a message for the footer status line.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.file.status_message = Some(message.into());
    }
}
