//! Components and the geometry of their pins.
//!
//! A [`Component`] is an image plus a table of pins. Every pin carries the
//! LM/RM corners of its connectable region in image pixels; the wire
//! attaches at the midpoint of that region. Scaling, rotating and placing a
//! component produce new values with every pin transformed along with it.

pub mod catalog;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WiringError};
use crate::geometry::{Coordinate, Rotation};
use crate::routing::types::{Direction, PinDestination, PinKind};

/// One pin of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct PinEntry {
    pub name: String,
    pub usage: PinKind,
    /// Controller pin this pin must be wired to; `None` leaves it unwired.
    pub destination: Option<PinDestination>,
    /// Left-most corner of the connectable region.
    pub lm: Coordinate,
    /// Right-most corner of the connectable region.
    pub rm: Coordinate,
    /// Side the wire leaves from.
    pub location: Option<Direction>,
}

impl PinEntry {
    pub fn new(name: impl Into<String>, usage: PinKind, lm: (f64, f64), rm: (f64, f64)) -> Self {
        let name = name.into();
        Self {
            lm: Coordinate::new(format!("LM {name}"), lm.0, lm.1),
            rm: Coordinate::new(format!("RM {name}"), rm.0, rm.1),
            name,
            usage,
            destination: None,
            location: None,
        }
    }

    pub fn leaving(mut self, direction: Direction) -> Self {
        self.location = Some(direction);
        self
    }

    pub fn wired_to(mut self, destination: PinDestination) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Connection point: the midpoint of LM and RM.
    pub fn anchor(&self) -> Coordinate {
        self.lm.midpoint(&self.rm).with_label(self.name.clone())
    }

    fn map_corners(&self, f: impl Fn(&Coordinate) -> Coordinate) -> Self {
        Self {
            lm: f(&self.lm),
            rm: f(&self.rm),
            ..self.clone()
        }
    }
}

/// The parts the catalog knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    /// Raspberry Pi 40-pin GPIO header.
    PiHeader,
    Led,
    Button,
    Resistor,
}

impl ComponentKind {
    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::PiHeader,
            ComponentKind::Led,
            ComponentKind::Button,
            ComponentKind::Resistor,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::PiHeader => "pi-header",
            ComponentKind::Led => "led",
            ComponentKind::Button => "button",
            ComponentKind::Resistor => "resistor",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ComponentKind::PiHeader => "Pi GPIO Pin Header",
            ComponentKind::Led => "Basic LED",
            ComponentKind::Button => "Basic Button",
            ComponentKind::Resistor => "Basic Resistor",
        }
    }

    pub fn is_controller(self) -> bool {
        matches!(self, ComponentKind::PiHeader)
    }
}

impl FromStr for ComponentKind {
    type Err = WiringError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| WiringError::UnknownComponent {
                kind: s.to_string(),
            })
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A component image and its pins, in some frame (image-local until placed).
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub label: String,
    pub kind: ComponentKind,
    /// Width and height of the image in the current frame.
    pub size: (u32, u32),
    /// Pins keyed by physical pin number.
    pub pins: BTreeMap<u32, PinEntry>,
    /// Artwork to draw; an outlined box is drawn when absent.
    pub image: Option<PathBuf>,
    /// Rated electrical values, listed by `route` and in the legend.
    pub ratings: BTreeMap<String, String>,
    /// Accumulated rotation applied to the artwork.
    pub rotation: Rotation,
    /// Canvas position of the top-left corner.
    pub origin: Coordinate,
}

impl Component {
    pub fn new(label: impl Into<String>, kind: ComponentKind, size: (u32, u32)) -> Self {
        Self {
            label: label.into(),
            kind,
            size,
            pins: BTreeMap::new(),
            image: None,
            ratings: BTreeMap::new(),
            rotation: Rotation::None,
            origin: Coordinate::at(0.0, 0.0),
        }
    }

    pub fn with_pin(mut self, number: u32, pin: PinEntry) -> Self {
        self.pins.insert(number, pin);
        self
    }

    pub fn with_rating(mut self, name: &str, value: impl Into<String>) -> Self {
        self.ratings.insert(name.to_string(), value.into());
        self
    }

    /// Ratings as `Name value` pairs in name order, or `None` when unrated.
    pub fn rating_summary(&self) -> Option<String> {
        if self.ratings.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .ratings
            .iter()
            .map(|(name, value)| format!("{name} {value}"))
            .collect();
        Some(parts.join(", "))
    }

    pub fn with_image(mut self, image: Option<PathBuf>) -> Self {
        self.image = image;
        self
    }

    pub fn pin(&self, number: u32) -> Option<&PinEntry> {
        self.pins.get(&number)
    }

    pub fn anchor(&self, number: u32) -> Option<Coordinate> {
        self.pin(number).map(PinEntry::anchor)
    }

    /// Human-readable pin name used for wire labels, e.g. `Doorbell's INPUT Pin 1`.
    pub fn pin_label(&self, number: u32) -> String {
        match self.pin(number) {
            Some(pin) => format!("{}'s {} Pin {}", self.label, pin.usage, number),
            None => format!("{}'s Pin {}", self.label, number),
        }
    }

    /// Physical pin numbers whose usage is `kind`, ascending.
    pub fn pins_of(&self, kind: PinKind) -> Vec<u32> {
        self.pins
            .iter()
            .filter(|(_, pin)| pin.usage == kind)
            .map(|(&n, _)| n)
            .collect()
    }

    /// Resize the image to `width x height`, scaling every pin corner with it.
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        let sx = width as f64 / self.size.0.max(1) as f64;
        let sy = height as f64 / self.size.1.max(1) as f64;
        let origin = &self.origin;
        let pins = self
            .pins
            .iter()
            .map(|(&n, pin)| {
                let scaled = pin.map_corners(|c| {
                    let local = c - origin;
                    &local.scale(sx, sy) + origin
                });
                (n, scaled)
            })
            .collect();
        Self {
            size: (width, height),
            pins,
            ..self.clone()
        }
    }

    /// Turn the component clockwise by `rotation` within its own frame.
    ///
    /// Pin corners follow the artwork and every departure direction turns
    /// with it. Quarter turns swap the width and height.
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let (w, h) = (self.size.0 as f64, self.size.1 as f64);
        let origin = &self.origin;
        let pins = self
            .pins
            .iter()
            .map(|(&n, pin)| {
                let mut turned = pin.map_corners(|c| {
                    let local = c - origin;
                    &local.rotate_in_frame(rotation, w, h) + origin
                });
                turned.location = pin.location.map(|d| d.rotated(rotation));
                (n, turned)
            })
            .collect();
        let size = if rotation.swaps_axes() {
            (self.size.1, self.size.0)
        } else {
            self.size
        };
        Self {
            size,
            pins,
            rotation: self.rotation.then(rotation),
            ..self.clone()
        }
    }

    /// Move the component so its top-left corner sits at `(x, y)` on the canvas.
    pub fn placed(&self, x: f64, y: f64) -> Self {
        let dx = x - self.origin.x;
        let dy = y - self.origin.y;
        let pins = self
            .pins
            .iter()
            .map(|(&n, pin)| (n, pin.map_corners(|c| c.translate(dx, dy))))
            .collect();
        Self {
            pins,
            origin: Coordinate::new(self.label.clone(), x, y),
            ..self.clone()
        }
    }

    /// Canvas-space centre of the component.
    pub fn center(&self) -> Coordinate {
        self.origin
            .translate(self.size.0 as f64 / 2.0, self.size.1 as f64 / 2.0)
    }
}
