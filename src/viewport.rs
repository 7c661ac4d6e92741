//! Viewport transform: pan and zoom between screen space and the grid plane.
//!
//! The forward transform moves the canvas center to the origin, scales uniformly,
//! moves back, then applies the pan translation:
//!
//! ```text
//! screen = c + s * (grid + t - c)
//! grid   = (screen - c) / s + c - t
//! ```
//!
//! Zoom is therefore anchored at the canvas center, never at the cursor.
//! The grid plane is the unscaled drawing plane; a stored point lands in it at
//! `position * unit_spacing`.

use crate::constants::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, SCALE_DECIMALS};
use crate::precision::round_half_up;

/// Pan/zoom state of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    translate_x: f64,
    translate_y: f64,
    scale: f64,
    /// Size of the on-screen canvas in pixels, used to find the zoom anchor
    canvas_size: (f64, f64),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: DEFAULT_SCALE,
            canvas_size: (0.0, 0.0),
        }
    }
}

impl Viewport {
    /// Creates a viewport for a canvas of the given pixel size.
    pub fn new(canvas_size: (f64, f64)) -> Self {
        Self {
            canvas_size,
            ..Self::default()
        }
    }

    /// Current pan translation in grid-plane units.
    pub fn translation(&self) -> (f64, f64) {
        (self.translate_x, self.translate_y)
    }

    /// Current zoom scale, always within `[MIN_SCALE, MAX_SCALE]`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel size of the canvas the viewport maps onto.
    pub fn canvas_size(&self) -> (f64, f64) {
        self.canvas_size
    }

    /// Updates the canvas size. Called by the UI whenever the canvas is laid out.
    pub fn set_canvas_size(&mut self, size: (f64, f64)) {
        self.canvas_size = size;
    }

    fn center(&self) -> (f64, f64) {
        (self.canvas_size.0 / 2.0, self.canvas_size.1 / 2.0)
    }

    /// Maps a grid-plane position to screen coordinates.
    pub fn to_screen(&self, grid: (f64, f64)) -> (f64, f64) {
        let (cx, cy) = self.center();
        (
            cx + self.scale * (grid.0 + self.translate_x - cx),
            cy + self.scale * (grid.1 + self.translate_y - cy),
        )
    }

    /// Maps a screen position back to the grid plane. Exact inverse of [`Viewport::to_screen`].
    pub fn to_grid(&self, screen: (f64, f64)) -> (f64, f64) {
        let (cx, cy) = self.center();
        (
            (screen.0 - cx) / self.scale + cx - self.translate_x,
            (screen.1 - cy) / self.scale + cy - self.translate_y,
        )
    }

    /// Requests a new scale.
    ///
    /// The value is rounded half-up to a fixed number of decimals first, so repeated
    /// ±0.1 steps land on exact tenths. Values outside `[MIN_SCALE, MAX_SCALE]`
    /// are ignored.
    ///
    /// # Returns
    ///
    /// `true` if the scale was stored.
    pub fn set_scale(&mut self, value: f64) -> bool {
        let rounded = round_half_up(value, SCALE_DECIMALS);
        if !(MIN_SCALE..=MAX_SCALE).contains(&rounded) {
            return false;
        }
        self.scale = rounded;
        true
    }

    /// Adds `delta` to the current scale under the same rules as [`Viewport::set_scale`].
    pub fn add_scale(&mut self, delta: f64) -> bool {
        self.set_scale(self.scale + delta)
    }

    /// Shifts the pan translation by a grid-plane delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Restores the default translation and scale. The canvas size is kept.
    pub fn reset(&mut self) {
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.scale = DEFAULT_SCALE;
    }

    /// Zoom readout shown in the footer; reads 100 at the default scale.
    pub fn zoom_percent(&self) -> i32 {
        (self.scale * 100.0).round() as i32 - 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCALE_STEP;
    use proptest::prelude::*;

    fn assert_close(a: (f64, f64), b: (f64, f64)) {
        assert!(
            (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    proptest! {
        #[test]
        fn round_trip_holds_for_every_valid_scale(
            scale in MIN_SCALE..=MAX_SCALE,
            gx in -1.0e6f64..1.0e6,
            gy in -1.0e6f64..1.0e6,
            pan_x in -1.0e4f64..1.0e4,
            pan_y in -1.0e4f64..1.0e4,
            width in 1.0f64..4000.0,
            height in 1.0f64..4000.0,
        ) {
            let mut viewport = Viewport::new((width, height));
            viewport.pan_by(pan_x, pan_y);
            prop_assert!(viewport.set_scale(scale));

            let (rx, ry) = viewport.to_grid(viewport.to_screen((gx, gy)));
            let tolerance = 1e-9 * (1.0 + gx.abs().max(gy.abs()) + 1.0e4);
            prop_assert!((rx - gx).abs() <= tolerance, "x {} -> {}", gx, rx);
            prop_assert!((ry - gy).abs() <= tolerance, "y {} -> {}", gy, ry);
        }
    }

    #[test]
    fn zoom_is_anchored_at_canvas_center() {
        let mut viewport = Viewport::new((1000.0, 600.0));
        let center = (500.0, 300.0);
        let before = viewport.to_grid(center);
        viewport.set_scale(2.0);
        assert_close(viewport.to_grid(center), before);
    }

    #[test]
    fn out_of_range_scale_is_ignored() {
        let mut viewport = Viewport::default();
        assert!(!viewport.set_scale(0.05));
        assert!(!viewport.set_scale(2.2));
        assert_eq!(viewport.scale(), DEFAULT_SCALE);
        assert!(viewport.set_scale(0.1));
        assert!(viewport.set_scale(2.1));
        assert_eq!(viewport.scale(), 2.1);
    }

    #[test]
    fn repeated_steps_stay_on_exact_tenths() {
        let mut viewport = Viewport::default();
        for _ in 0..25 {
            viewport.add_scale(-SCALE_STEP);
        }
        assert_eq!(viewport.scale(), 0.1);

        viewport.reset();
        viewport.add_scale(-SCALE_STEP);
        assert_eq!(viewport.scale(), 1.0);

        for _ in 0..25 {
            viewport.add_scale(SCALE_STEP);
        }
        assert_eq!(viewport.scale(), 2.1);
    }

    #[test]
    fn reset_restores_defaults_and_readout() {
        let mut viewport = Viewport::new((800.0, 600.0));
        viewport.pan_by(10.0, -20.0);
        viewport.set_scale(1.5);
        assert_eq!(viewport.zoom_percent(), 140);

        viewport.reset();
        assert_eq!(viewport.translation(), (0.0, 0.0));
        assert_eq!(viewport.scale(), 1.1);
        assert_eq!(viewport.zoom_percent(), 100);
        assert_eq!(viewport.canvas_size(), (800.0, 600.0));
    }
}
