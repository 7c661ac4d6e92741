//! Painting draw commands onto the egui canvas.

use super::state::TourCanvasApp;
use crate::render::{closed_segments, DrawCommand};
use eframe::egui;

fn color(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

impl TourCanvasApp {
    /// Paints the current frame into `canvas_rect`.
    ///
    /// Draw commands are in canvas-local coordinates and are offset by the rect's
    /// top-left corner here.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for the canvas
    /// * `canvas_rect` - The screen rectangle of the canvas
    pub fn paint_canvas(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let origin = canvas_rect.min.to_vec2();
        let to_pos = |(x, y): (f64, f64)| egui::pos2(x as f32, y as f32) + origin;

        for command in self.editor.render() {
            match command {
                DrawCommand::Background { rgb } => {
                    painter.rect_filled(canvas_rect, 0.0, color(rgb));
                }
                DrawCommand::Tour { vertices, rgb, width, .. } => {
                    let stroke = egui::Stroke::new(width as f32, color(rgb));
                    for [from, to] in closed_segments(&vertices) {
                        painter.line_segment([to_pos(from), to_pos(to)], stroke);
                    }
                }
                DrawCommand::Marker { center, radius, rgb } => {
                    painter.circle_filled(to_pos(center), radius as f32, color(rgb));
                }
            }
        }
    }
}
