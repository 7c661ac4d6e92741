//! Scene rendering into backend-agnostic draw commands.
//!
//! The renderer only reads state. It produces screen-space commands in a fixed
//! order: background, group A tour, group B tour, then every point in store order.
//! The egui painter and the SVG exporter both consume the same command list.

use crate::config::CanvasConfig;
use crate::constants::{BACKGROUND_RGB, SELECTION_MARKER_RATIO, SELECTION_RGB, TOUR_STROKE_WIDTH};
use crate::tour::TourCache;
use crate::types::{PointStore, TourGroup};
use crate::viewport::Viewport;

/// A single screen-space drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas
    Background {
        /// Fill color
        rgb: [u8; 3],
    },
    /// A closed polyline through the given points (last connects back to first)
    Tour {
        /// Group the tour belongs to
        group: TourGroup,
        /// Vertices in visiting order, in screen coordinates
        vertices: Vec<(f64, f64)>,
        /// Stroke color
        rgb: [u8; 3],
        /// Stroke width in screen pixels
        width: f64,
    },
    /// A filled circle
    Marker {
        /// Center in screen coordinates
        center: (f64, f64),
        /// Radius in screen pixels
        radius: f64,
        /// Fill color
        rgb: [u8; 3],
    },
}

/// Builds the draw commands for one frame.
///
/// # Arguments
///
/// * `store` - Points to draw, in store order
/// * `viewport` - Current pan/zoom transform
/// * `tours` - Cached tours; absent tours are simply not drawn
/// * `config` - Marker size and unit spacing
pub fn render_scene(
    store: &PointStore,
    viewport: &Viewport,
    tours: &TourCache,
    config: &CanvasConfig,
) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(store.len() + 3);
    commands.push(DrawCommand::Background { rgb: BACKGROUND_RGB });

    let scale = viewport.scale();
    let to_screen = |position: (f64, f64)| viewport.to_screen(config.grid_to_plane(position));

    for group in TourGroup::BOTH {
        let Some(tour) = tours.get(group) else {
            continue;
        };
        let vertices: Vec<(f64, f64)> = tour
            .ordered_ids()
            .filter_map(|id| store.get(id))
            .map(|p| to_screen(p.position))
            .collect();
        commands.push(DrawCommand::Tour {
            group,
            vertices,
            rgb: group.tag().rgb(),
            width: f64::from(TOUR_STROKE_WIDTH) * scale,
        });
    }

    let radius = config.marker_diameter / 2.0 * scale;
    for point in store {
        let center = to_screen(point.position);
        commands.push(DrawCommand::Marker {
            center,
            radius,
            rgb: point.tag.rgb(),
        });
        if point.selected {
            commands.push(DrawCommand::Marker {
                center,
                radius: radius * SELECTION_MARKER_RATIO,
                rgb: SELECTION_RGB,
            });
        }
    }

    commands
}

/// Line segments of a closed polyline, including the closing edge.
pub fn closed_segments(vertices: &[(f64, f64)]) -> Vec<[(f64, f64); 2]> {
    if vertices.len() < 2 {
        return Vec::new();
    }
    (0..vertices.len())
        .map(|i| [vertices[i], vertices[(i + 1) % vertices.len()]])
        .collect()
}
