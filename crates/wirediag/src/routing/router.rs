use log::{debug, trace};

use crate::error::{Result, WiringError};
use crate::geometry::Coordinate;

use super::grid::OccupancyGrid;
use super::types::{Axis, Direction, RouterConfig};
use super::wire::{Wire, WireColor};

/// Tracks the axis of the previous step and how many steps in a row used it.
#[derive(Debug, Clone, Copy)]
struct AxisGuard {
    last: Axis,
    run: u32,
    limit: u32,
}

impl AxisGuard {
    /// The departure segment counts as the first step of its axis.
    fn seeded(axis: Axis, limit: u32) -> Self {
        Self {
            last: axis,
            run: 1,
            limit,
        }
    }

    fn choose(&mut self, preferred: Axis) -> Axis {
        if preferred != self.last {
            self.last = preferred;
            self.run = 1;
        } else if self.run >= self.limit {
            self.last = preferred.other();
            self.run = 1;
        } else {
            self.run += 1;
        }
        self.last
    }
}

/// Greedy orthogonal router that paints every wire it builds into one grid.
#[derive(Debug)]
pub struct WireRouter {
    config: RouterConfig,
    grid: OccupancyGrid,
}

impl WireRouter {
    pub fn new(config: RouterConfig, grid: OccupancyGrid) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn into_grid(self) -> OccupancyGrid {
        self.grid
    }

    /// Build a wire from `start` to `destination`.
    ///
    /// The wire first leaves `start` in `departure` for the configured
    /// clearance, then closes the gap one capped step at a time, favouring the
    /// axis with more distance left. No axis is used more than
    /// `max_same_axis_run` times in a row; when the other axis has nothing
    /// left the forced turn is a zero-length segment.
    ///
    /// Every segment is painted into the grid as it is added. A bounds or
    /// overlap error aborts the wire; cells painted by earlier segments of
    /// that wire stay painted.
    pub fn create_wire(
        &mut self,
        label: &str,
        start: &Coordinate,
        destination: &Coordinate,
        departure: Direction,
        color: WireColor,
    ) -> Result<Wire> {
        debug!(
            "Routing '{}' from {} to {} leaving {}",
            label, start, destination, departure
        );

        let mut wire = Wire::new(label, color, self.config.wire_width);
        let (ux, uy) = departure.unit();
        let clearance = self.config.departure_length(departure);
        let mut tip = start
            .translate(ux * clearance, uy * clearance)
            .with_label(label);
        self.push_segment(&mut wire, start.with_label(label), tip.clone(), true)?;

        let mut guard = AxisGuard::seeded(departure.axis(), self.config.max_same_axis_run);
        while tip != *destination {
            let dx = destination.x - tip.x;
            let dy = destination.y - tip.y;
            let preferred = if dx.abs() >= dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            let axis = guard.choose(preferred);
            let next = self.step(&tip, destination, axis);
            let remaining = match axis {
                Axis::Horizontal => dx,
                Axis::Vertical => dy,
            };
            if next == tip && remaining != 0.0 {
                return Err(WiringError::InvalidConfig {
                    reason: format!(
                        "a {} px step cannot move '{}' from {} towards {}",
                        self.config.cap(axis),
                        label,
                        tip,
                        destination
                    ),
                });
            }
            self.push_segment(&mut wire, tip, next.clone(), false)?;
            tip = next;
        }

        debug!(
            "Routed '{}' in {} segments ({} px)",
            label,
            wire.len(),
            wire.total_length()
        );
        Ok(wire)
    }

    /// One step along `axis`: the remaining distance if it fits under the
    /// cap, otherwise exactly the cap.
    fn step(&self, tip: &Coordinate, destination: &Coordinate, axis: Axis) -> Coordinate {
        let cap = self.config.cap(axis);
        let advance = |from: f64, to: f64| {
            let delta = to - from;
            if delta.abs() <= cap {
                to
            } else {
                from + cap.copysign(delta)
            }
        };
        match axis {
            Axis::Horizontal => {
                Coordinate::new(tip.label.clone(), advance(tip.x, destination.x), tip.y)
            }
            Axis::Vertical => {
                Coordinate::new(tip.label.clone(), tip.x, advance(tip.y, destination.y))
            }
        }
    }

    fn push_segment(
        &mut self,
        wire: &mut Wire,
        from: Coordinate,
        to: Coordinate,
        include_start: bool,
    ) -> Result<()> {
        let painted = self
            .grid
            .set_pixel_run(&from, &to, &wire.label, include_start)?;
        trace!(
            "{} segment {}: {} -> {} ({} px painted)",
            wire.label,
            wire.len() + 1,
            from,
            to,
            painted
        );
        wire.add_segment(from, to);
        Ok(())
    }
}
