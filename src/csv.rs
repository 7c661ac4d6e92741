//! Point persistence in the plain `x,y,code` CSV format.
//!
//! One record per line. Coordinates are rounded half-up to a fixed number of
//! fractional digits both when written and when read, so repeated save/load cycles
//! never accumulate floating-point drift. Any malformed record fails the whole load.

use crate::constants::{CSV_DECIMALS, ORDERED_EXPORT_SUFFIX};
use crate::error::{EditorError, EditorResult};
use crate::precision::round_half_up;
use crate::tour::TourCache;
use crate::types::{ColorTag, Point, PointStore, TourGroup};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Parses CSV text into points, in file order.
///
/// Blank lines are skipped and whitespace around fields is ignored.
///
/// # Errors
///
/// [`EditorError::Format`] naming the first offending line if a record does not
/// have exactly three fields, a coordinate is not a finite number, or the color
/// code is unknown.
pub fn parse_points(text: &str) -> EditorResult<Vec<Point>> {
    let mut points = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let record = raw.trim();
        if record.is_empty() {
            continue;
        }

        let fields: Vec<&str> = record.split(',').map(str::trim).collect();
        let [x, y, code] = fields.as_slice() else {
            return Err(EditorError::format(
                line,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        let x = parse_coordinate(x, line)?;
        let y = parse_coordinate(y, line)?;
        let code: u8 = code
            .parse()
            .map_err(|_| EditorError::format(line, format!("invalid color code {code:?}")))?;
        let tag = ColorTag::from_code(code)
            .ok_or_else(|| EditorError::format(line, format!("unknown color code {code}")))?;

        points.push(Point::new((x, y), tag));
    }
    Ok(points)
}

fn parse_coordinate(field: &str, line: usize) -> EditorResult<f64> {
    let value: f64 = field
        .parse()
        .map_err(|_| EditorError::format(line, format!("invalid number {field:?}")))?;
    if !value.is_finite() {
        return Err(EditorError::format(line, format!("non-finite number {field:?}")));
    }
    Ok(round_half_up(value, CSV_DECIMALS))
}

/// Serializes points as CSV text, one `x,y,code` record per line.
pub fn format_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> String {
    let mut out = String::new();
    for point in points {
        let x = round_half_up(point.position.0, CSV_DECIMALS);
        let y = round_half_up(point.position.1, CSV_DECIMALS);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{x},{y},{}", point.tag.code());
    }
    out
}

/// Serializes the points covered by computed tours, in visiting order.
///
/// Group A's tour comes first, then group B's. Groups without a tour contribute
/// nothing.
pub fn format_ordered(store: &PointStore, tours: &TourCache) -> String {
    let ordered: Vec<&Point> = TourGroup::BOTH
        .iter()
        .filter_map(|group| tours.get(*group))
        .flat_map(|tour| tour.ordered_ids())
        .filter_map(|id| store.get(id))
        .collect();
    format_points(ordered)
}

/// Reads and parses a CSV file.
pub fn read_points(path: &Path) -> EditorResult<Vec<Point>> {
    let text = std::fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
    parse_points(&text)
}

/// Writes CSV text to `path`, replacing any existing file.
pub fn write_text(path: &Path, text: &str) -> EditorResult<()> {
    std::fs::write(path, text).map_err(|e| EditorError::io(path, e))
}

/// Sibling path of the tour-ordered export for a document saved at `path`.
pub fn ordered_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(ORDERED_EXPORT_SUFFIX);
    PathBuf::from(name)
}
