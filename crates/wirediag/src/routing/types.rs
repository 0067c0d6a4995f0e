use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WiringError};
use crate::geometry::{Coordinate, Rotation};

use super::grid::OccupancyGrid;
use super::wire::{DEFAULT_WIRE_WIDTH, Wire, WireColor};

/// Side of a component a wire leaves from, in screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// Unit step `(dx, dy)` in screen coordinates.
    pub fn unit(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Right => (1.0, 0.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
        }
    }

    /// The direction after the owning component is turned clockwise.
    pub fn rotated(self, rotation: Rotation) -> Direction {
        let turns = (rotation.degrees() / 90) as usize;
        let idx = Direction::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Direction::ALL[(idx + turns) % 4]
    }
}

impl FromStr for Direction {
    type Err = WiringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "top" => Ok(Direction::Up),
            "down" | "bottom" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(WiringError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// Travel axis of a wire segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Single-letter tag used by the textual wire format.
    pub fn tag(self) -> char {
        match self {
            Axis::Horizontal => 'H',
            Axis::Vertical => 'V',
        }
    }
}

/// What a pin is electrically used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinKind {
    Ground,
    #[serde(rename = "3v3")]
    V3_3,
    #[serde(rename = "5v")]
    V5,
    VOther,
    Input,
    Output,
    Passive,
}

impl PinKind {
    /// The shared supply this pin belongs to, if any.
    pub fn rail(self) -> Option<Rail> {
        match self {
            PinKind::Ground => Some(Rail::Ground),
            PinKind::V3_3 => Some(Rail::V3_3),
            PinKind::V5 => Some(Rail::V5),
            _ => None,
        }
    }

    pub fn is_rail(self) -> bool {
        self.rail().is_some()
    }
}

impl fmt::Display for PinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PinKind::Ground => "GROUND",
            PinKind::V3_3 => "3V3",
            PinKind::V5 => "5V",
            PinKind::VOther => "VOTHER",
            PinKind::Input => "INPUT",
            PinKind::Output => "OUTPUT",
            PinKind::Passive => "PASSIVE",
        };
        f.write_str(name)
    }
}

/// A supply rail that several controller pins provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rail {
    Ground,
    V3_3,
    V5,
}

impl Rail {
    pub const ALL: [Rail; 3] = [Rail::Ground, Rail::V3_3, Rail::V5];

    pub fn kind(self) -> PinKind {
        match self {
            Rail::Ground => PinKind::Ground,
            Rail::V3_3 => PinKind::V3_3,
            Rail::V5 => PinKind::V5,
        }
    }
}

/// Where on the controller a component pin must be wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinDestination {
    /// A specific physical controller pin.
    Pin(u32),
    /// Any controller pin on the given rail; resolved before routing.
    Rail(Rail),
}

/// Router tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig {
    /// Longest horizontal step.
    pub max_width_of_wire: f64,
    /// Longest vertical step.
    pub max_length_of_wire: f64,
    /// Departure segment length as a multiple of the step cap on its axis.
    pub departure_multiplier: f64,
    /// Most consecutive segments allowed on one axis before a forced turn.
    pub max_same_axis_run: u32,
    /// Stroke width given to every wire, in pixels.
    pub wire_width: u32,
}

impl RouterConfig {
    pub const DEFAULT_SEGMENT_RATIO: f64 = 0.035;
    pub const DEFAULT_DEPARTURE_MULTIPLIER: f64 = 3.0;
    pub const DEFAULT_SAME_AXIS_RUN: u32 = 3;
    /// Smallest usable step cap, in pixels.
    pub const MIN_STEP: f64 = 1.0;

    /// Caps proportional to the canvas height, so wire granularity follows
    /// image size.
    pub fn for_canvas(_width: u32, height: u32, segment_ratio: f64) -> Self {
        let cap = segment_ratio * height as f64;
        Self {
            max_width_of_wire: cap,
            max_length_of_wire: cap,
            departure_multiplier: Self::DEFAULT_DEPARTURE_MULTIPLIER,
            max_same_axis_run: Self::DEFAULT_SAME_AXIS_RUN,
            wire_width: DEFAULT_WIRE_WIDTH,
        }
    }

    pub fn cap(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.max_width_of_wire,
            Axis::Vertical => self.max_length_of_wire,
        }
    }

    pub fn departure_length(&self, direction: Direction) -> f64 {
        self.cap(direction.axis()) * self.departure_multiplier
    }

    pub fn validate(&self) -> Result<()> {
        let usable = |v: f64| v.is_finite() && v >= Self::MIN_STEP;
        if !usable(self.max_width_of_wire) || !usable(self.max_length_of_wire) {
            return Err(WiringError::InvalidConfig {
                reason: format!(
                    "step caps must be at least {} px (horizontal {}, vertical {})",
                    Self::MIN_STEP,
                    self.max_width_of_wire,
                    self.max_length_of_wire
                ),
            });
        }
        if !self.departure_multiplier.is_finite() || self.departure_multiplier < 0.0 {
            return Err(WiringError::InvalidConfig {
                reason: format!(
                    "departure multiplier must be non-negative, got {}",
                    self.departure_multiplier
                ),
            });
        }
        if self.max_same_axis_run == 0 {
            return Err(WiringError::InvalidConfig {
                reason: "same-axis run limit must be at least 1".to_string(),
            });
        }
        if self.wire_width == 0 {
            return Err(WiringError::InvalidConfig {
                reason: "wire width must be at least 1 pixel".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::for_canvas(1920, 1080, Self::DEFAULT_SEGMENT_RATIO)
    }
}

/// One wire to route: a component pin anchor to a controller pin anchor.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub label: String,
    pub start: Coordinate,
    pub destination: Coordinate,
    pub departure: Direction,
    pub color: WireColor,
}

/// Result for routing a single request.
#[derive(Debug, Clone)]
pub enum RouteResult {
    Success(Wire),
    Failure { warning: String, error: WiringError },
}

impl RouteResult {
    pub fn wire(&self) -> Option<&Wire> {
        match self {
            RouteResult::Success(wire) => Some(wire),
            RouteResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&WiringError> {
        match self {
            RouteResult::Success(_) => None,
            RouteResult::Failure { error, .. } => Some(error),
        }
    }
}

/// Output of routing a batch of requests.
#[derive(Debug)]
pub struct RoutingOutput {
    /// One entry per request, in request order.
    pub results: Vec<(WireRequest, RouteResult)>,
    /// The grid after every successful wire was painted.
    pub grid: OccupancyGrid,
}

impl RoutingOutput {
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.results.iter().filter_map(|(_, result)| result.wire())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.results.iter().filter_map(|(_, result)| match result {
            RouteResult::Failure { warning, .. } => Some(warning.as_str()),
            RouteResult::Success(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parsing_accepts_aliases() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("top".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" Bottom ".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert_eq!(
            err,
            WiringError::InvalidDirection {
                value: "sideways".to_string()
            }
        );
    }

    #[test]
    fn direction_turns_clockwise_with_rotation() {
        assert_eq!(Direction::Down.rotated(Rotation::Half), Direction::Up);
        assert_eq!(Direction::Up.rotated(Rotation::Quarter), Direction::Right);
        assert_eq!(Direction::Left.rotated(Rotation::Quarter), Direction::Up);
        assert_eq!(Direction::Right.rotated(Rotation::None), Direction::Right);
        for d in Direction::ALL {
            assert_eq!(d.rotated(Rotation::ThreeQuarter).rotated(Rotation::Quarter), d);
        }
    }

    #[test]
    fn rail_kinds_map_to_rails() {
        assert_eq!(PinKind::Ground.rail(), Some(Rail::Ground));
        assert_eq!(PinKind::V5.rail(), Some(Rail::V5));
        assert!(!PinKind::Input.is_rail());
        for rail in Rail::ALL {
            assert_eq!(rail.kind().rail(), Some(rail));
        }
    }

    #[test]
    fn default_caps_follow_canvas_height() {
        let config = RouterConfig::default();
        assert!((config.max_length_of_wire - 37.8).abs() < 1e-9);
        assert_eq!(config.max_width_of_wire, config.max_length_of_wire);
        assert!((config.departure_length(Direction::Left) - 113.4).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sub_pixel_cap_is_invalid() {
        let config = RouterConfig {
            max_length_of_wire: 0.5,
            ..RouterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WiringError::InvalidConfig { .. })
        ));
        let config = RouterConfig {
            max_width_of_wire: RouterConfig::MIN_STEP,
            max_length_of_wire: RouterConfig::MIN_STEP,
            ..RouterConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_cap_is_invalid() {
        let config = RouterConfig {
            max_width_of_wire: 0.0,
            ..RouterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WiringError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn pin_kind_yaml_names() {
        let kind: PinKind = serde_yaml::from_str("3v3").unwrap();
        assert_eq!(kind, PinKind::V3_3);
        let kind: PinKind = serde_yaml::from_str("v-other").unwrap();
        assert_eq!(kind, PinKind::VOther);
    }
}
