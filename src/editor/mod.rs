//! The editor state record and the operations that mutate it.
//!
//! [`EditorState`] is the single application-state record. The interaction
//! controller, the document actions and the renderer all take it by reference
//! instead of holding back-references to each other.
//!
//! # Module Organization
//!
//! - `interaction` - Pointer and wheel event reducer (select, move, pan, zoom)
//! - `actions` - Document-level actions (add, delete, recolor, load, save, tours)

mod actions;
mod interaction;

#[cfg(test)]
mod tests;

pub use interaction::PointerEvent;

use crate::config::CanvasConfig;
use crate::constants::APP_TITLE;
use crate::render::{render_scene, DrawCommand};
use crate::tour::{GeneticTourSolver, TourCache, TourSolver};
use crate::types::{ColorTag, Point, PointId, PointStore};
use crate::viewport::Viewport;
use std::path::PathBuf;

/// Transient pointer state carried between events.
///
/// There is no explicit "released" state; a drag simply ends when no further drag
/// events arrive, and nothing here is reset on release.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    /// Screen position of the previous press or drag event
    pub reference: (f64, f64),
    /// The selected point, if any. At most one point is selected at a time.
    pub selected: Option<PointId>,
    /// Value published to the color picker; `None` means "no selection"
    pub color_control: Option<ColorTag>,
    /// Grid-plane coordinates under the cursor, for the position readout
    pub cursor_grid: (f64, f64),
}

/// File association and dirty tracking of the open document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentState {
    /// Path the document was last loaded from or saved to
    pub current_path: Option<PathBuf>,
    /// Whether the points changed since the last load or save
    pub edited: bool,
}

/// Everything the editor knows: points, view, cached tours, settings and the
/// injected tour solver.
pub struct EditorState {
    /// All points, in store order
    pub points: PointStore,
    /// Pan/zoom transform
    pub viewport: Viewport,
    /// Cached tours for both groups
    pub tours: TourCache,
    /// Marker size and unit spacing
    pub config: CanvasConfig,
    /// Pointer interaction state
    pub interaction: InteractionState,
    /// File association and dirty flag
    pub document: DocumentState,
    solver: Box<dyn TourSolver>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::with_solver(Box::new(GeneticTourSolver::default()))
    }
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("points", &self.points)
            .field("viewport", &self.viewport)
            .field("tours", &self.tours)
            .field("config", &self.config)
            .field("interaction", &self.interaction)
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl EditorState {
    /// Creates an empty editor that computes tours with `solver`.
    pub fn with_solver(solver: Box<dyn TourSolver>) -> Self {
        Self {
            points: PointStore::new(),
            viewport: Viewport::default(),
            tours: TourCache::default(),
            config: CanvasConfig::default(),
            interaction: InteractionState::default(),
            document: DocumentState::default(),
            solver,
        }
    }

    /// Replaces the tour solver.
    pub fn set_solver(&mut self, solver: Box<dyn TourSolver>) {
        self.solver = solver;
    }

    /// The currently selected point, if any.
    pub fn selected_point(&self) -> Option<&Point> {
        self.interaction.selected.and_then(|id| self.points.get(id))
    }

    /// Builds the draw commands for the current frame.
    pub fn render(&self) -> Vec<DrawCommand> {
        render_scene(&self.points, &self.viewport, &self.tours, &self.config)
    }

    /// Window title reflecting the open file.
    pub fn window_title(&self) -> String {
        match &self.document.current_path {
            Some(path) => format!("{APP_TITLE} - {}", path.display()),
            None => APP_TITLE.to_string(),
        }
    }
}
