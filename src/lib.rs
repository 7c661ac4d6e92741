//! # Tour Canvas
//!
//! An interactive 2D point editor. Points live on an infinite grid and carry one of
//! five color tags; the canvas can be panned and zoomed, and points can be selected,
//! dragged, recolored, added and deleted.
//!
//! ## Features
//! - Pan/zoom viewport with a fixed, exactly invertible transform
//! - Shift-click selection and shift-drag to move points
//! - Closed tours over the two tourable color groups, computed by a pluggable
//!   [`TourSolver`] (a genetic solver ships by default)
//! - Plain `x,y,code` CSV documents, plus a tour-ordered export
//! - SVG and PNG export of the current view

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod csv;
pub mod editor;
pub mod error;
pub mod precision;
pub mod render;
pub mod tour;
pub mod types;
pub mod viewport;
mod ui;

pub use config::CanvasConfig;
pub use editor::{EditorState, PointerEvent};
pub use error::{EditorError, EditorResult};
pub use render::DrawCommand;
pub use tour::{GeneticTourSolver, TourSolver};
pub use types::*;
pub use ui::{
    build_svg, rasterize, ConfirmChoice, FileOperationResult, FileState, PendingConfirmAction,
    PendingExportOperation, PendingSaveOperation, PersistedSettings, TourCanvasApp,
};
pub use viewport::Viewport;

/// Runs the editor window.
///
/// Settings saved by a previous session are restored from eframe storage.
/// Must be called from within a tokio runtime, which runs the file dialogs.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// #[tokio::main]
/// async fn main() -> Result<(), eframe::Error> {
///     tour_canvas::run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        constants::APP_TITLE,
        options,
        Box::new(|cc| {
            let app = cc
                .storage
                .and_then(|storage| storage.get_string(ui::STORAGE_KEY))
                .and_then(|json| match TourCanvasApp::from_json(&json) {
                    Ok(app) => Some(app),
                    Err(e) => {
                        log::warn!("Ignoring unreadable saved settings: {e}");
                        None
                    }
                })
                .unwrap_or_default();
            Ok(Box::new(app))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_editor_is_empty() {
        let editor = EditorState::default();
        assert!(editor.points.is_empty());
        assert!(editor.tours.is_empty());
        assert_eq!(editor.viewport.zoom_percent(), 100);
        assert_eq!(editor.window_title(), "CSV Editor");
    }

    #[test]
    fn color_codes_match_persisted_format() {
        let codes: Vec<u8> = ColorTag::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes, [0, 1, 2, 3, 4]);
    }
}
