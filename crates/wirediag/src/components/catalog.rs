//! Built-in parts with pin geometry measured off their reference artwork.

use std::path::PathBuf;

use crate::error::{Result, WiringError};
use crate::routing::types::{Direction, PinDestination, PinKind, Rail};

use super::{Component, ComponentKind, PinEntry};

/// Artwork sizes the pin tables were measured against.
pub const PI_HEADER_SIZE: (u32, u32) = (120, 810);
pub const LED_SIZE: (u32, u32) = (360, 440);
pub const BUTTON_SIZE: (u32, u32) = (370, 400);
pub const RESISTOR_SIZE: (u32, u32) = (350, 410);

pub const DEFAULT_RESISTANCE_OHMS: f64 = 220.0;

const HEADER_PINS: u32 = 40;

/// What a physical header pin is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPin {
    Supply3v3,
    Supply5v,
    Ground,
    /// General purpose I/O, with its BCM number.
    Gpio(u32),
    /// ID EEPROM pins, not for general use.
    Reserved,
}

/// Usage of a physical pin on the 40-pin header.
pub fn header_pin(physical: u32) -> Option<HeaderPin> {
    let pin = match physical {
        1 | 17 => HeaderPin::Supply3v3,
        2 | 4 => HeaderPin::Supply5v,
        6 | 9 | 14 | 20 | 25 | 30 | 34 | 39 => HeaderPin::Ground,
        27 | 28 => HeaderPin::Reserved,
        3 => HeaderPin::Gpio(2),
        5 => HeaderPin::Gpio(3),
        7 => HeaderPin::Gpio(4),
        8 => HeaderPin::Gpio(14),
        10 => HeaderPin::Gpio(15),
        11 => HeaderPin::Gpio(17),
        12 => HeaderPin::Gpio(18),
        13 => HeaderPin::Gpio(27),
        15 => HeaderPin::Gpio(22),
        16 => HeaderPin::Gpio(23),
        18 => HeaderPin::Gpio(24),
        19 => HeaderPin::Gpio(10),
        21 => HeaderPin::Gpio(9),
        22 => HeaderPin::Gpio(25),
        23 => HeaderPin::Gpio(11),
        24 => HeaderPin::Gpio(8),
        26 => HeaderPin::Gpio(7),
        29 => HeaderPin::Gpio(5),
        31 => HeaderPin::Gpio(6),
        32 => HeaderPin::Gpio(12),
        33 => HeaderPin::Gpio(13),
        35 => HeaderPin::Gpio(19),
        36 => HeaderPin::Gpio(16),
        37 => HeaderPin::Gpio(26),
        38 => HeaderPin::Gpio(20),
        40 => HeaderPin::Gpio(21),
        _ => return None,
    };
    Some(pin)
}

/// BCM number of a physical header pin, if it is a GPIO.
pub fn bcm_number(physical: u32) -> Option<u32> {
    match header_pin(physical)? {
        HeaderPin::Gpio(bcm) => Some(bcm),
        _ => None,
    }
}

/// Raspberry Pi 40-pin GPIO header, drawn as two columns of pads.
///
/// Odd pins sit in the left column and are reached from the left; even pins
/// sit in the right column and are reached from the right.
pub fn pi_header(label: &str) -> Component {
    let mut header = Component::new(label, ComponentKind::PiHeader, PI_HEADER_SIZE)
        .with_rating("Voltage Output", "3.3 V / 5 V");

    for n in 1..=HEADER_PINS {
        let Some(kind) = header_pin(n) else { continue };
        let row = ((n - 1) / 2) as f64;
        let top = 15.0 + 40.0 * row;
        let (left, direction) = if n % 2 == 1 {
            (30.0, Direction::Left)
        } else {
            (70.0, Direction::Right)
        };
        let (name, usage) = match kind {
            HeaderPin::Supply3v3 => ("3.3V Power".to_string(), PinKind::V3_3),
            HeaderPin::Supply5v => ("5V Power".to_string(), PinKind::V5),
            HeaderPin::Ground => ("Ground".to_string(), PinKind::Ground),
            HeaderPin::Gpio(bcm) => (format!("GPIO{bcm}"), PinKind::Passive),
            HeaderPin::Reserved => ("ID EEPROM".to_string(), PinKind::Passive),
        };
        let pin = PinEntry::new(name, usage, (left, top), (left + 20.0, top + 20.0))
            .leaving(direction);
        header.pins.insert(n, pin);
    }
    header
}

/// Basic LED driven by a GPIO output; its cathode goes to ground.
pub fn led(label: &str, controller_pin: u32) -> Component {
    Component::new(label, ComponentKind::Led, LED_SIZE)
        .with_rating("Voltage Input", "3.3 V / 5 V")
        .with_rating("Current", "0.02 A")
        .with_rating("Resistance", "120 Ω")
        .with_pin(
            1,
            PinEntry::new("Cathode", PinKind::Ground, (126.0, 309.0), (146.0, 356.0))
                .leaving(Direction::Down)
                .wired_to(PinDestination::Rail(Rail::Ground)),
        )
        .with_pin(
            2,
            PinEntry::new("Anode", PinKind::Output, (217.0, 309.0), (232.0, 413.0))
                .leaving(Direction::Down)
                .wired_to(PinDestination::Pin(controller_pin)),
        )
}

/// Momentary push button read by a GPIO input; its other leg goes to ground.
pub fn button(label: &str, controller_pin: u32) -> Component {
    Component::new(label, ComponentKind::Button, BUTTON_SIZE)
        .with_rating("Voltage Input", "3.3 V / 5 V")
        .with_pin(
            1,
            PinEntry::new("Signal", PinKind::Input, (90.0, 300.0), (111.0, 360.0))
                .leaving(Direction::Down)
                .wired_to(PinDestination::Pin(controller_pin)),
        )
        .with_pin(
            2,
            PinEntry::new("Ground", PinKind::Ground, (255.0, 300.0), (278.0, 360.0))
                .leaving(Direction::Down)
                .wired_to(PinDestination::Rail(Rail::Ground)),
        )
}

/// Two-lead resistor. Its leads are drawn but never wired to the controller.
pub fn resistor(label: &str, ohms: f64) -> Component {
    Component::new(label, ComponentKind::Resistor, RESISTOR_SIZE)
        .with_rating("Resistance", format!("{ohms} Ω"))
        .with_pin(
            1,
            PinEntry::new("Lead 1", PinKind::Passive, (30.0, 203.0), (61.0, 207.0))
                .leaving(Direction::Left),
        )
        .with_pin(
            2,
            PinEntry::new("Lead 2", PinKind::Passive, (287.0, 203.0), (317.0, 209.0))
                .leaving(Direction::Right),
        )
}

/// Parameters a project can give a catalog part.
#[derive(Debug, Clone, Default)]
pub struct PartSpec {
    /// Controller pin for the part's signal lead.
    pub pin: Option<u32>,
    pub resistance: Option<f64>,
    pub image: Option<PathBuf>,
}

/// Build a catalog part by kind.
///
/// LEDs and buttons need a controller pin for their signal lead.
pub fn build(kind: ComponentKind, label: &str, spec: &PartSpec) -> Result<Component> {
    let signal_pin = |pin: u32| {
        spec.pin.ok_or_else(|| WiringError::UnresolvedDestination {
            component: label.to_string(),
            pin,
        })
    };
    let part = match kind {
        ComponentKind::PiHeader => pi_header(label),
        ComponentKind::Led => led(label, signal_pin(2)?),
        ComponentKind::Button => button(label, signal_pin(1)?),
        ComponentKind::Resistor => {
            resistor(label, spec.resistance.unwrap_or(DEFAULT_RESISTANCE_OHMS))
        }
    };
    Ok(part.with_image(spec.image.clone()))
}
