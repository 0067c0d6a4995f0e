use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;

use super::types::Axis;

pub const DEFAULT_WIRE_WIDTH: u32 = 3;

/// Named RGB stroke colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireColor {
    pub name: String,
    pub rgb: [u8; 3],
}

impl WireColor {
    pub fn new(name: impl Into<String>, rgb: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }

    pub fn black() -> Self {
        Self::new("Black", [0, 0, 0])
    }
}

/// One straight piece of a wire.
#[derive(Debug, Clone, PartialEq)]
pub struct WireSegment {
    pub label: String,
    pub start: Coordinate,
    pub end: Coordinate,
    pub color: WireColor,
    pub width: u32,
}

impl WireSegment {
    pub fn new(
        label: impl Into<String>,
        start: Coordinate,
        end: Coordinate,
        color: WireColor,
        width: u32,
    ) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            color,
            width,
        }
    }

    /// Travel axis, or `None` for zero-length and diagonal segments.
    pub fn axis(&self) -> Option<Axis> {
        let moves_x = self.start.x != self.end.x;
        let moves_y = self.start.y != self.end.y;
        match (moves_x, moves_y) {
            (true, false) => Some(Axis::Horizontal),
            (false, true) => Some(Axis::Vertical),
            _ => None,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.manhattan_to(&self.end)
    }

    /// `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Approximate crossing test: the bounding boxes overlap strictly on both axes.
    ///
    /// A horizontal segment crossing a vertical one is caught; collinear
    /// overlaps and touching endpoints are not.
    pub fn intersects(&self, other: &WireSegment) -> bool {
        let (ax0, ay0, ax1, ay1) = self.bounds();
        let (bx0, by0, bx1, by1) = other.bounds();
        ax0 < bx1 && ax1 > bx0 && ay0 < by1 && ay1 > by0
    }
}

/// Ordered, contiguous path of segments from a component pin to a controller pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub label: String,
    pub color: WireColor,
    pub width: u32,
    segments: Vec<WireSegment>,
}

impl Wire {
    pub fn new(label: impl Into<String>, color: WireColor, width: u32) -> Self {
        Self {
            label: label.into(),
            color,
            width,
            segments: Vec::new(),
        }
    }

    /// Append a segment in the wire's own colour and width.
    pub fn add_segment(&mut self, start: Coordinate, end: Coordinate) {
        let (color, width) = (self.color.clone(), self.width);
        self.add_styled_segment(start, end, color, width);
    }

    pub fn add_styled_segment(
        &mut self,
        start: Coordinate,
        end: Coordinate,
        color: WireColor,
        width: u32,
    ) {
        let label = format!("{} Segment {}", self.label, self.segments.len() + 1);
        self.segments
            .push(WireSegment::new(label, start, end, color, width));
    }

    /// Segment by 1-based insertion number.
    pub fn segment(&self, number: usize) -> Option<&WireSegment> {
        number.checked_sub(1).and_then(|i| self.segments.get(i))
    }

    pub fn segments(&self) -> &[WireSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WireSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<&Coordinate> {
        self.segments.first().map(|s| &s.start)
    }

    pub fn end(&self) -> Option<&Coordinate> {
        self.segments.last().map(|s| &s.end)
    }

    /// Every segment starts where the previous one ended.
    pub fn is_contiguous(&self) -> bool {
        self.segments.windows(2).all(|w| w[0].end == w[1].start)
    }

    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(WireSegment::length).sum()
    }

    /// True if any segment of `self` crosses any segment of `other`.
    pub fn intersects(&self, other: &Wire) -> bool {
        self.segments
            .iter()
            .any(|a| other.segments.iter().any(|b| a.intersects(b)))
    }
}

impl<'a> IntoIterator for &'a Wire {
    type Item = &'a WireSegment;
    type IntoIter = std::slice::Iter<'a, WireSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
