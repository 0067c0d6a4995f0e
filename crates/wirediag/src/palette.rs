//! Wire colours.
//!
//! Rails always get their conventional colour. Signal wires take colours
//! from a colour-blind friendly list by index, wrapping around when a
//! diagram has more signal wires than colours.

use crate::error::{Result, WiringError};
use crate::routing::types::PinKind;
use crate::routing::wire::WireColor;

const SIGNAL_COLORS: &[(&str, [u8; 3])] = &[
    ("Dark Blue", [0, 0, 128]),
    ("Dark Green", [0, 128, 0]),
    ("Purple", [128, 0, 128]),
    ("Teal", [0, 128, 128]),
    ("Olive", [128, 128, 0]),
    ("Deep Blue", [0, 0, 192]),
    ("Magenta", [192, 0, 192]),
    ("Cyan", [0, 192, 192]),
    ("Deep Green", [0, 192, 0]),
    ("Goldenrod", [184, 134, 11]),
    ("Saddle Brown", [139, 69, 19]),
    ("Dark Olive Green", [85, 107, 47]),
    ("Forest Green", [34, 139, 34]),
    ("Steel Blue", [70, 130, 180]),
    ("Dark Slate Blue", [72, 61, 139]),
    ("Dark Magenta", [139, 0, 139]),
    ("Indian Red", [205, 92, 92]),
    ("Sandy Brown", [244, 164, 96]),
    ("Dark Sea Green", [143, 188, 143]),
    ("Slate Gray", [112, 128, 144]),
    ("Dim Gray", [105, 105, 105]),
    ("Dark Slate Gray", [47, 79, 79]),
    ("Deep Navy Blue", [0, 51, 102]),
    ("Deep Maroon", [102, 0, 51]),
    ("Coral", [255, 127, 80]),
    ("Gold", [255, 215, 0]),
    ("Brown", [165, 42, 42]),
    ("Sienna", [160, 82, 45]),
    ("Dark Salmon", [233, 150, 122]),
    ("Powder Blue", [176, 224, 230]),
    ("Dark Cyan", [0, 139, 139]),
    ("Sea Green", [46, 139, 87]),
    ("Medium Sea Green", [60, 179, 113]),
    ("Lawn Green", [124, 252, 0]),
    ("Cornflower Blue", [100, 149, 237]),
    ("Medium Violet Red", [199, 21, 133]),
    ("Dark Orchid", [153, 50, 204]),
    ("Medium Orchid", [186, 85, 211]),
];

pub fn ground_color() -> WireColor {
    WireColor::black()
}

pub fn supply_3v3_color() -> WireColor {
    WireColor::new("Orange", [255, 140, 0])
}

pub fn supply_5v_color() -> WireColor {
    WireColor::new("Red", [220, 20, 20])
}

/// Ordered list of signal colours.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<WireColor>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: SIGNAL_COLORS
                .iter()
                .map(|&(name, rgb)| WireColor::new(name, rgb))
                .collect(),
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<WireColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(WiringError::InvalidConfig {
                reason: "palette needs at least one colour".to_string(),
            });
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour of the `index`-th signal wire.
    pub fn signal(&self, index: usize) -> WireColor {
        self.colors[index % self.colors.len()].clone()
    }

    pub fn colors(&self) -> &[WireColor] {
        &self.colors
    }
}

/// Per-diagram colour assignment; owned by whoever builds the wires.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Palette,
    next_signal: usize,
}

impl ColorAssigner {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            next_signal: 0,
        }
    }

    /// Colour for the next wire leaving a pin of `kind`.
    ///
    /// Only signal wires advance through the palette.
    pub fn assign(&mut self, kind: PinKind) -> WireColor {
        match kind {
            PinKind::Ground => ground_color(),
            PinKind::V3_3 => supply_3v3_color(),
            PinKind::V5 => supply_5v_color(),
            _ => {
                let color = self.palette.signal(self.next_signal);
                self.next_signal += 1;
                color
            }
        }
    }

    pub fn signals_assigned(&self) -> usize {
        self.next_signal
    }
}
