//! Shared application-wide constants.
//! Centralizes tweakable values used across the viewport, tour pipeline, persistence and rendering.

// Viewport
/// Smallest accepted viewport scale. Keeps the transform invertible.
pub const MIN_SCALE: f64 = 0.1;
/// Largest accepted viewport scale.
pub const MAX_SCALE: f64 = 2.1;
/// Scale applied on startup and by "Reset viewport".
pub const DEFAULT_SCALE: f64 = 1.1;
/// Scale change per wheel notch or +/- button press.
pub const SCALE_STEP: f64 = 0.1;
/// Number of fractional digits kept when storing a new scale.
pub const SCALE_DECIMALS: u32 = 8;

// Points and rendering
/// Default on-screen diameter of a point marker, in pixels.
pub const DEFAULT_MARKER_DIAMETER: f64 = 25.0;
/// Default number of pixels per grid unit.
pub const DEFAULT_UNIT_SPACING: f64 = 50.0;
/// Lower bound for the marker size and unit spacing spinners.
pub const MIN_CANVAS_METRIC: f64 = 5.0;
/// Upper bound for the marker size and unit spacing spinners.
pub const MAX_CANVAS_METRIC: f64 = 100.0;
/// Increment of the marker size and unit spacing spinners.
pub const CANVAS_METRIC_STEP: f64 = 5.0;
/// Diameter of the selection marker relative to the point marker.
pub const SELECTION_MARKER_RATIO: f64 = 0.5;
/// Stroke width of tour polylines, in pixels.
pub const TOUR_STROKE_WIDTH: f32 = 5.0;

// Colors (RGB)
/// Canvas background.
pub const BACKGROUND_RGB: [u8; 3] = [48, 48, 48];
/// Inner marker drawn on top of a selected point.
pub const SELECTION_RGB: [u8; 3] = [48, 48, 48];

// Tour solver
/// Generation budget handed to the tour heuristic on every run.
pub const TOUR_MAX_GENERATIONS: u32 = 1000;
/// Whether the heuristic runs to its budget without being stepped.
pub const TOUR_AUTO_ADVANCE: bool = true;
/// Population size of the genetic tour solver.
pub const TOUR_POPULATION_SIZE: usize = 40;
/// Probability that a child tour is mutated.
pub const TOUR_MUTATION_RATE: f64 = 0.2;
/// Number of best tours copied unchanged into the next generation.
pub const TOUR_ELITE_COUNT: usize = 2;

// Persistence
/// Fractional digits kept for coordinates written to or read from CSV.
pub const CSV_DECIMALS: u32 = 8;
/// Suffix appended to the current path for the tour-ordered export.
pub const ORDERED_EXPORT_SUFFIX: &str = ".ordered.csv";
/// Window title used when no file is open.
pub const APP_TITLE: &str = "CSV Editor";
