//! Document-level actions triggered from the toolbar and menus.

use super::EditorState;
use crate::csv;
use crate::error::EditorResult;
use crate::types::{ColorTag, Point, PointId};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

impl EditorState {
    /// Appends a new uncolored point at the grid origin.
    pub fn add_point(&mut self) -> PointId {
        let id = self.points.add(Point::new((0.0, 0.0), ColorTag::None));
        self.document.edited = true;
        info!("Added point {id}");
        id
    }

    /// Deletes the selected point. No-op without a selection.
    pub fn delete_selected(&mut self) -> Option<Point> {
        let id = self.interaction.selected.take()?;
        self.interaction.color_control = None;
        let removed = self.points.remove(id)?;
        self.tours.invalidate_tag(removed.tag);
        self.document.edited = true;
        info!("Deleted point {id}");
        Some(removed)
    }

    /// Changes the color of the selected point. No-op without a selection.
    ///
    /// Both the old and the new group lose their cached tour.
    pub fn recolor_selected(&mut self, tag: ColorTag) -> bool {
        let Some(point) = self
            .interaction
            .selected
            .and_then(|id| self.points.get_mut(id))
        else {
            return false;
        };
        let previous = std::mem::replace(&mut point.tag, tag);
        if previous != tag {
            self.tours.invalidate_tag(previous);
            self.tours.invalidate_tag(tag);
            self.document.edited = true;
        }
        self.interaction.color_control = Some(tag);
        true
    }

    /// Restores the default pan and zoom.
    pub fn reset_viewport(&mut self) {
        self.viewport.reset();
    }

    /// Sets the zoom factor; out-of-range values are ignored.
    pub fn set_scale(&mut self, value: f64) -> bool {
        self.viewport.set_scale(value)
    }

    /// Adjusts the zoom factor; results out of range are ignored.
    pub fn add_scale(&mut self, delta: f64) -> bool {
        self.viewport.add_scale(delta)
    }

    /// Sets the marker diameter (clamped to the spinner range).
    pub fn set_marker_diameter(&mut self, value: f64) {
        self.config.set_marker_diameter(value);
    }

    /// Sets the unit spacing (clamped to the spinner range).
    pub fn set_unit_spacing(&mut self, value: f64) {
        self.config.set_unit_spacing(value);
    }

    /// Starts an empty, unsaved document. The viewport and canvas settings are kept.
    pub fn new_document(&mut self) {
        self.clear_selection();
        self.points.clear();
        self.tours.clear();
        self.document.current_path = None;
        self.document.edited = false;
        info!("Started new document");
    }

    /// Replaces the document with the contents of the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O or format error; the current document is left untouched.
    pub fn load_document(&mut self, path: &Path) -> EditorResult<()> {
        match csv::read_points(path) {
            Ok(points) => {
                self.apply_loaded(path.to_path_buf(), points);
                Ok(())
            }
            Err(e) => {
                error!("Failed to load {}: {e}", path.display());
                Err(e)
            }
        }
    }

    /// Installs already-parsed points as the open document.
    pub fn apply_loaded(&mut self, path: PathBuf, points: Vec<Point>) {
        self.clear_selection();
        self.points.clear();
        self.tours.clear();
        let count = points.len();
        for point in points {
            self.points.add(point);
        }
        info!("Loaded {count} points from {}", path.display());
        self.document.current_path = Some(path);
        self.document.edited = false;
    }

    /// Writes the document to `path` and makes it the current file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error; the current path and dirty flag are unchanged.
    pub fn save_document(&mut self, path: &Path) -> EditorResult<()> {
        let text = csv::format_points(&self.points);
        if let Err(e) = csv::write_text(path, &text) {
            error!("Failed to save {}: {e}", path.display());
            return Err(e);
        }
        self.mark_saved(path.to_path_buf());
        Ok(())
    }

    /// Records a successful save to `path`.
    pub fn mark_saved(&mut self, path: PathBuf) {
        info!("Saved {} points to {}", self.points.len(), path.display());
        self.document.current_path = Some(path);
        self.document.edited = false;
    }

    /// Recomputes the tours of both groups with the configured solver.
    ///
    /// # Errors
    ///
    /// [`crate::EditorError::InvalidTour`] if the solver misbehaves.
    pub fn compute_tour(&mut self) -> EditorResult<()> {
        self.tours.compute(&self.points, self.solver.as_ref())
    }

    /// Writes the tour-ordered points next to the current file.
    ///
    /// Returns the written path, or `None` when the document has never been saved.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from writing the export.
    pub fn export_ordered(&self) -> EditorResult<Option<PathBuf>> {
        let Some(current) = &self.document.current_path else {
            warn!("Skipping ordered export: document has no file yet");
            return Ok(None);
        };
        let target = csv::ordered_path(current);
        csv::write_text(&target, &csv::format_ordered(&self.points, &self.tours))?;
        info!("Wrote ordered export to {}", target.display());
        Ok(Some(target))
    }

    /// Computes both tours, then writes the ordered export.
    ///
    /// # Errors
    ///
    /// Propagates solver and I/O errors.
    pub fn show_tour(&mut self) -> EditorResult<Option<PathBuf>> {
        self.compute_tour()?;
        self.export_ordered()
    }
}
