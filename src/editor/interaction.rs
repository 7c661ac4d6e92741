//! Pointer interaction: selection, drag-to-move, drag-to-pan and wheel zoom.
//!
//! Each event is folded into the editor state by [`EditorState::handle_pointer`].
//! The modifier (shift) switches the pointer between navigating the view and
//! editing points; the mode is re-derived from every event instead of being stored.

use super::EditorState;
use crate::constants::SCALE_STEP;
use crate::types::{distance, PointId};
use log::debug;

/// A pointer or wheel input event, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Press {
        /// Pointer position
        pos: (f64, f64),
        /// Whether the modifier was held
        modifier: bool,
    },
    /// Pointer moved while the button is held
    Drag {
        /// Pointer position
        pos: (f64, f64),
        /// Whether the modifier was held
        modifier: bool,
    },
    /// Pointer moved with no button held
    Move {
        /// Pointer position
        pos: (f64, f64),
    },
    /// Wheel turned; positive notches roll toward the user and zoom out
    Wheel {
        /// Signed number of notches
        notches: i32,
        /// Whether the modifier was held
        modifier: bool,
    },
}

impl EditorState {
    /// Applies one input event to the editor state.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { pos, modifier } => self.press(pos, modifier),
            PointerEvent::Drag { pos, modifier } => self.drag(pos, modifier),
            PointerEvent::Move { pos } => self.update_cursor_readout(pos),
            PointerEvent::Wheel { notches, modifier } => self.wheel(notches, modifier),
        }
    }

    /// Press: drops the current selection, then hit-tests when the modifier is held.
    fn press(&mut self, pos: (f64, f64), modifier: bool) {
        self.interaction.reference = pos;
        self.clear_selection();

        if modifier {
            if let Some(id) = self.hit_test(pos) {
                self.select(id);
            }
        }
    }

    /// Drag: moves the selected point (modifier held) or pans the view.
    fn drag(&mut self, pos: (f64, f64), modifier: bool) {
        let scale = self.viewport.scale();
        let dx = (pos.0 - self.interaction.reference.0) / scale;
        let dy = (pos.1 - self.interaction.reference.1) / scale;
        self.interaction.reference = pos;

        if modifier {
            if let Some(id) = self.interaction.selected {
                let spacing = self.config.unit_spacing;
                if let Some(point) = self.points.get_mut(id) {
                    point.position.0 += dx / spacing;
                    point.position.1 += dy / spacing;
                    let tag = point.tag;
                    self.document.edited = true;
                    self.tours.invalidate_tag(tag);
                }
            }
        } else {
            self.viewport.pan_by(dx, dy);
        }
        self.update_cursor_readout(pos);
    }

    /// Wheel: one scale step per notch unless the modifier is held.
    fn wheel(&mut self, notches: i32, modifier: bool) {
        if modifier || notches == 0 {
            return;
        }
        let step = if notches > 0 { -SCALE_STEP } else { SCALE_STEP };
        for _ in 0..notches.unsigned_abs() {
            self.viewport.add_scale(step);
        }
        debug!("Wheel zoom to scale {}", self.viewport.scale());
    }

    fn update_cursor_readout(&mut self, pos: (f64, f64)) {
        self.interaction.cursor_grid = self.viewport.to_grid(pos);
    }

    /// Finds the point under a screen position.
    ///
    /// Every point is tested in store order with no early exit, so when markers
    /// overlap the point added last wins.
    pub fn hit_test(&self, screen: (f64, f64)) -> Option<PointId> {
        let cursor = self.viewport.to_grid(screen);
        let radius = self.config.marker_diameter / 2.0;
        let mut hit = None;
        for point in &self.points {
            if distance(self.config.grid_to_plane(point.position), cursor) < radius {
                hit = Some(point.id);
            }
        }
        hit
    }

    /// Makes `id` the only selected point and publishes its color.
    pub fn select(&mut self, id: PointId) {
        self.clear_selection();
        if let Some(point) = self.points.get_mut(id) {
            point.selected = true;
            self.interaction.selected = Some(id);
            self.interaction.color_control = Some(point.tag);
            debug!("Selected point {id}");
        }
    }

    /// Drops the selection and resets the color picker to "no selection".
    pub fn clear_selection(&mut self) {
        if let Some(id) = self.interaction.selected.take() {
            if let Some(point) = self.points.get_mut(id) {
                point.selected = false;
            }
        }
        self.interaction.color_control = None;
    }
}
