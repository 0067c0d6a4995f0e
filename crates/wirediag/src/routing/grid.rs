use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WiringError};
use crate::geometry::Coordinate;

/// What painting an already painted cell does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Fail with [`WiringError::CellAlreadyPainted`]; nothing from that line is painted.
    Reject,
    /// Silently keep the cell painted.
    #[default]
    Overwrite,
    /// Keep the cell painted and remember the collision.
    Track,
}

impl OverlapPolicy {
    pub fn name(self) -> &'static str {
        match self {
            OverlapPolicy::Reject => "reject",
            OverlapPolicy::Overwrite => "overwrite",
            OverlapPolicy::Track => "track",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "reject" => Some(OverlapPolicy::Reject),
            "overwrite" => Some(OverlapPolicy::Overwrite),
            "track" => Some(OverlapPolicy::Track),
            _ => None,
        }
    }
}

/// A cell painted a second time under [`OverlapPolicy::Track`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub x: i64,
    pub y: i64,
    pub owner: String,
}

/// Sparse record of canvas pixels already used by wires.
///
/// Only painted cells are stored, as a map from column to the set of painted
/// rows. Every access is bounds-checked against `[0, width) x [0, height)`.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    policy: OverlapPolicy,
    cells: BTreeMap<i64, BTreeSet<i64>>,
    painted: usize,
    collisions: Vec<Collision>,
}

impl OccupancyGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_policy(width, height, OverlapPolicy::default())
    }

    pub fn with_policy(width: u32, height: u32, policy: OverlapPolicy) -> Self {
        Self {
            width,
            height,
            policy,
            cells: BTreeMap::new(),
            painted: 0,
            collisions: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }

    /// True when the horizontal distance from `start` to `end` is strictly the larger one.
    pub fn is_longest_path(start: &Coordinate, end: &Coordinate) -> bool {
        (end.x - start.x).abs() > (end.y - start.y).abs()
    }

    fn check_bounds(&self, x: i64, y: i64) -> Result<()> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Err(WiringError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        self.cells.get(&x).is_some_and(|col| col.contains(&y))
    }

    /// Paint a cell already known to be in bounds.
    fn paint(&mut self, x: i64, y: i64, owner: &str) -> Result<()> {
        if self.cells.entry(x).or_default().insert(y) {
            self.painted += 1;
            return Ok(());
        }
        match self.policy {
            OverlapPolicy::Reject => Err(WiringError::CellAlreadyPainted {
                x,
                y,
                owner: owner.to_string(),
            }),
            OverlapPolicy::Overwrite => Ok(()),
            OverlapPolicy::Track => {
                self.collisions.push(Collision {
                    x,
                    y,
                    owner: owner.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Paint the pixel nearest to `coord`, attributing it to the coordinate's label.
    pub fn set_pixel(&mut self, coord: &Coordinate) -> Result<()> {
        let (x, y) = coord.to_pixel();
        self.check_bounds(x, y)?;
        self.paint(x, y, &coord.label)
    }

    pub fn set_pixels(&mut self, coords: &[Coordinate]) -> Result<()> {
        for coord in coords {
            self.set_pixel(coord)?;
        }
        Ok(())
    }

    /// Paint every pixel on the straight line from `start` to `end`, both ends included.
    ///
    /// Returns the number of pixels on the line.
    pub fn set_pixel_line(
        &mut self,
        start: &Coordinate,
        end: &Coordinate,
        label: &str,
    ) -> Result<usize> {
        self.set_pixel_run(start, end, label, true)
    }

    /// Like [`OccupancyGrid::set_pixel_line`], optionally leaving out the
    /// starting pixel so consecutive segments of one wire don't collide at
    /// their shared joint.
    ///
    /// The whole line is checked before anything is painted: a bounds or
    /// overlap failure leaves the grid untouched.
    pub fn set_pixel_run(
        &mut self,
        start: &Coordinate,
        end: &Coordinate,
        label: &str,
        include_start: bool,
    ) -> Result<usize> {
        let points = line_points(start.to_pixel(), end.to_pixel());
        let skip = usize::from(!include_start);

        for &(x, y) in points.iter().skip(skip) {
            self.check_bounds(x, y)?;
        }
        if self.policy == OverlapPolicy::Reject {
            if let Some(&(x, y)) = points.iter().skip(skip).find(|&&(x, y)| self.contains(x, y)) {
                return Err(WiringError::CellAlreadyPainted {
                    x,
                    y,
                    owner: label.to_string(),
                });
            }
        }

        let mut count = 0;
        for &(x, y) in points.iter().skip(skip) {
            self.paint(x, y, label)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_pixel_set(&self, coord: &Coordinate) -> Result<bool> {
        let (x, y) = coord.to_pixel();
        self.check_bounds(x, y)?;
        Ok(self.contains(x, y))
    }

    pub fn clear_pixel(&mut self, coord: &Coordinate) -> Result<()> {
        let (x, y) = coord.to_pixel();
        self.check_bounds(x, y)?;
        if let Some(col) = self.cells.get_mut(&x) {
            if col.remove(&y) {
                self.painted -= 1;
            }
            if col.is_empty() {
                self.cells.remove(&x);
            }
        }
        Ok(())
    }

    /// Painted cells as column -> rows.
    pub fn cells(&self) -> &BTreeMap<i64, BTreeSet<i64>> {
        &self.cells
    }

    /// Number of distinct painted cells.
    pub fn painted_count(&self) -> usize {
        self.painted
    }

    /// Collisions recorded under [`OverlapPolicy::Track`], in painting order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}

/// Integer pixels on the line from `start` to `end`, inclusive.
///
/// Steps one pixel at a time along the axis with the larger displacement and
/// interpolates the other one, so there is exactly one pixel per column
/// (or row) on the dominant axis. Equal-magnitude diagonals step both axes.
pub fn line_points(start: (i64, i64), end: (i64, i64)) -> Vec<(i64, i64)> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return vec![start];
    }

    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            (
                start.0 + (dx as f64 * t).round() as i64,
                start.1 + (dy as f64 * t).round() as i64,
            )
        })
        .collect()
}
