//! Core data types for the tour canvas.
//!
//! This module defines the point model, the closed set of color tags, the two
//! tourable groups, and the ordered point store the rest of the crate works on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for points on the canvas.
///
/// Identity is independent of a point's index, so selection and group membership
/// survive the addition or removal of other points.
pub type PointId = Uuid;

/// The color tag carried by every point.
///
/// `GroupA` and `GroupB` mark points that take part in tour computation; the other
/// tags are decorative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ColorTag {
    /// Default tag for new points (orange)
    #[default]
    None,
    /// First tourable group (blue)
    GroupA,
    /// Second tourable group (yellow)
    GroupB,
    /// Decorative accent (red)
    Accent1,
    /// Decorative accent (white)
    Accent2,
}

impl ColorTag {
    /// All tags in persisted-code order.
    pub const ALL: [ColorTag; 5] = [
        ColorTag::None,
        ColorTag::GroupA,
        ColorTag::GroupB,
        ColorTag::Accent1,
        ColorTag::Accent2,
    ];

    /// Small integer stored in the third CSV column.
    pub fn code(self) -> u8 {
        match self {
            ColorTag::None => 0,
            ColorTag::GroupA => 1,
            ColorTag::GroupB => 2,
            ColorTag::Accent1 => 3,
            ColorTag::Accent2 => 4,
        }
    }

    /// Decodes a persisted color code. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Human-readable color name shown in the color picker.
    pub fn label(self) -> &'static str {
        match self {
            ColorTag::None => "orange",
            ColorTag::GroupA => "blue",
            ColorTag::GroupB => "yellow",
            ColorTag::Accent1 => "red",
            ColorTag::Accent2 => "white",
        }
    }

    /// Fill color of markers carrying this tag.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            ColorTag::None => [255, 110, 0],
            ColorTag::GroupA => [0, 0, 255],
            ColorTag::GroupB => [255, 255, 0],
            ColorTag::Accent1 => [255, 0, 0],
            ColorTag::Accent2 => [255, 255, 255],
        }
    }

    /// The tourable group this tag belongs to, if any.
    pub fn group(self) -> Option<TourGroup> {
        match self {
            ColorTag::GroupA => Some(TourGroup::A),
            ColorTag::GroupB => Some(TourGroup::B),
            _ => None,
        }
    }
}

/// One of the two disjoint groups a tour can be computed over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TourGroup {
    /// Points tagged [`ColorTag::GroupA`]
    A,
    /// Points tagged [`ColorTag::GroupB`]
    B,
}

impl TourGroup {
    /// Both groups, in rendering order.
    pub const BOTH: [TourGroup; 2] = [TourGroup::A, TourGroup::B];

    /// The color tag that places a point in this group.
    pub fn tag(self) -> ColorTag {
        match self {
            TourGroup::A => ColorTag::GroupA,
            TourGroup::B => ColorTag::GroupB,
        }
    }
}

impl std::fmt::Display for TourGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourGroup::A => write!(f, "group A"),
            TourGroup::B => write!(f, "group B"),
        }
    }
}

/// A labeled point placed on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// Unique identifier for this point
    pub id: PointId,
    /// Position in grid units as (x, y)
    pub position: (f64, f64),
    /// Color tag of the point
    pub tag: ColorTag,
    /// Whether the point is the current selection
    #[serde(skip)]
    pub selected: bool,
}

impl Point {
    /// Creates a new, unselected point.
    ///
    /// # Arguments
    ///
    /// * `position` - The (x, y) position in grid units
    /// * `tag` - The color tag of the point
    pub fn new(position: (f64, f64), tag: ColorTag) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            tag,
            selected: false,
        }
    }
}

/// Euclidean distance between two positions.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Ordered collection of all points on the canvas.
///
/// Store order is significant: it is the hit-test scan order, the draw order, and
/// the order in which tour groups are partitioned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point and returns its ID.
    pub fn add(&mut self, point: Point) -> PointId {
        let id = point.id;
        self.points.push(point);
        id
    }

    /// Removes the point with the given ID, returning it if it existed.
    pub fn remove(&mut self, id: PointId) -> Option<Point> {
        let index = self.position_of(id)?;
        Some(self.points.remove(index))
    }

    /// Looks up a point by ID.
    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Looks up a point by ID for mutation.
    pub fn get_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.iter_mut().find(|p| p.id == id)
    }

    /// Index of the point with the given ID in store order.
    pub fn position_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    /// Iterates over all points in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Points belonging to `group`, in store order.
    pub fn members_of(&self, group: TourGroup) -> Vec<&Point> {
        self.points
            .iter()
            .filter(|p| p.tag.group() == Some(group))
            .collect()
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Removes every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<'a> IntoIterator for &'a PointStore {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_codes_round_trip_and_reject_unknown() {
        for tag in ColorTag::ALL {
            assert_eq!(ColorTag::from_code(tag.code()), Some(tag));
        }
        assert_eq!(ColorTag::from_code(5), None);
        assert_eq!(ColorTag::from_code(255), None);
    }

    #[test]
    fn only_group_tags_are_tourable() {
        assert_eq!(ColorTag::GroupA.group(), Some(TourGroup::A));
        assert_eq!(ColorTag::GroupB.group(), Some(TourGroup::B));
        assert_eq!(ColorTag::None.group(), None);
        assert_eq!(ColorTag::Accent1.group(), None);
        assert_eq!(ColorTag::Accent2.group(), None);
    }

    #[test]
    fn identity_survives_removal_of_other_points() {
        let mut store = PointStore::new();
        let a = store.add(Point::new((0.0, 0.0), ColorTag::GroupA));
        let b = store.add(Point::new((1.0, 0.0), ColorTag::GroupB));
        let c = store.add(Point::new((2.0, 0.0), ColorTag::GroupA));

        if let Some(p) = store.get_mut(c) {
            p.selected = true;
        }
        assert!(store.remove(a).is_some());

        assert_eq!(store.len(), 2);
        assert_eq!(store.position_of(b), Some(0));
        assert!(store.get(c).map(|p| p.selected).unwrap_or(false));
        assert_eq!(store.members_of(TourGroup::A).len(), 1);
    }

    #[test]
    fn members_preserve_store_order() {
        let mut store = PointStore::new();
        let first = store.add(Point::new((5.0, 5.0), ColorTag::GroupB));
        store.add(Point::new((0.0, 0.0), ColorTag::Accent1));
        let second = store.add(Point::new((1.0, 1.0), ColorTag::GroupB));

        let ids: Vec<PointId> = store.members_of(TourGroup::B).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second]);
    }
}
