//! Canvas rendering configuration shared by the renderer and the interaction controller.

use crate::constants::{
    DEFAULT_MARKER_DIAMETER, DEFAULT_UNIT_SPACING, MAX_CANVAS_METRIC, MIN_CANVAS_METRIC,
};
use serde::{Deserialize, Serialize};

/// Marker size and grid spacing used to place points on screen.
///
/// Held by the editor state and passed explicitly to the renderer and hit test.
/// Persisted between sessions with the rest of the UI settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Screen pixels per grid unit (before viewport scaling)
    pub unit_spacing: f64,
    /// Diameter of a point marker in pixels (before viewport scaling)
    pub marker_diameter: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            unit_spacing: DEFAULT_UNIT_SPACING,
            marker_diameter: DEFAULT_MARKER_DIAMETER,
        }
    }
}

impl CanvasConfig {
    /// Sets the unit spacing, clamped to the spinner range.
    pub fn set_unit_spacing(&mut self, value: f64) {
        self.unit_spacing = value.clamp(MIN_CANVAS_METRIC, MAX_CANVAS_METRIC);
    }

    /// Sets the marker diameter, clamped to the spinner range.
    pub fn set_marker_diameter(&mut self, value: f64) {
        self.marker_diameter = value.clamp(MIN_CANVAS_METRIC, MAX_CANVAS_METRIC);
    }

    /// Maps a position in grid units onto the viewport's grid plane.
    pub fn grid_to_plane(&self, position: (f64, f64)) -> (f64, f64) {
        (position.0 * self.unit_spacing, position.1 * self.unit_spacing)
    }

    /// Clamps both values into range; used after deserializing persisted settings.
    pub fn sanitized(mut self) -> Self {
        self.set_unit_spacing(self.unit_spacing);
        self.set_marker_diameter(self.marker_diameter);
        self
    }
}
