//! Points on the canvas and the transforms applied to them.
//!
//! A [`Coordinate`] is a plain value: scaling, rotating or moving one returns a
//! new point, so a component's pin anchors and a router's in-flight waypoints
//! never alias each other.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WiringError};

/// Labelled 2-D point in canvas pixels (y grows downwards).
///
/// Equality and hashing only look at `(x, y)`; the label is diagnostic metadata.
#[derive(Clone, Serialize, Deserialize)]
pub struct Coordinate {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Replace a zero divisor/exponent component with 1.
fn nonzero(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}

/// Bit pattern used for hashing, with -0.0 folded onto 0.0 to agree with `==`.
fn hash_bits(v: f64) -> u64 {
    if v == 0.0 { 0u64 } else { v.to_bits() }
}

impl Coordinate {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }

    /// Point with an empty label, used for transient waypoints.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(String::new(), x, y)
    }

    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self::new(label, self.x, self.y)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.label.clone(), self.x + dx, self.y + dy)
    }

    /// Non-uniform scale about the origin.
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.label.clone(), self.x * sx, self.y * sy)
    }

    pub fn midpoint(&self, other: &Coordinate) -> Self {
        Self::new(
            self.label.clone(),
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
        )
    }

    /// Nearest integer pixel.
    pub fn to_pixel(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }

    pub fn manhattan_to(&self, other: &Coordinate) -> f64 {
        (other.x - self.x).abs() + (other.y - self.y).abs()
    }

    /// Component-wise power; a zero exponent component counts as 1.
    pub fn powf(&self, other: &Coordinate) -> Self {
        Self::new(
            self.label.clone(),
            self.x.powf(nonzero(other.x)),
            self.y.powf(nonzero(other.y)),
        )
    }

    pub fn abs(&self) -> Self {
        Self::new(self.label.clone(), self.x.abs(), self.y.abs())
    }

    pub fn round(&self) -> Self {
        Self::new(self.label.clone(), self.x.round(), self.y.round())
    }

    pub fn floor(&self) -> Self {
        Self::new(self.label.clone(), self.x.floor(), self.y.floor())
    }

    pub fn ceil(&self) -> Self {
        Self::new(self.label.clone(), self.x.ceil(), self.y.ceil())
    }

    /// Rotate clockwise (on screen) about `center` by an axis-aligned angle.
    ///
    /// Uses swaps and negations only, so four quarter turns land exactly on
    /// the starting point.
    pub fn rotate_about(&self, center: &Coordinate, rotation: Rotation) -> Self {
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        let (rx, ry) = match rotation {
            Rotation::None => (dx, dy),
            Rotation::Quarter => (-dy, dx),
            Rotation::Half => (-dx, -dy),
            Rotation::ThreeQuarter => (dy, -dx),
        };
        Self::new(self.label.clone(), center.x + rx, center.y + ry)
    }

    /// Map a point of a `width x height` image into the frame of the same image
    /// rotated clockwise by `rotation`.
    ///
    /// Quarter turns swap the frame's dimensions, so the rotated image is
    /// `height x width`. This matches `image::imageops::rotate90` and friends.
    pub fn rotate_in_frame(&self, rotation: Rotation, width: f64, height: f64) -> Self {
        let (x, y) = match rotation {
            Rotation::None => (self.x, self.y),
            Rotation::Quarter => (height - self.y, self.x),
            Rotation::Half => (width - self.x, height - self.y),
            Rotation::ThreeQuarter => (self.y, width - self.x),
        };
        Self::new(self.label.clone(), x, y)
    }

    /// Rotate clockwise (on screen) about `center` by an arbitrary angle.
    ///
    /// Only for angles that are not a multiple of 90; those go through
    /// [`Coordinate::rotate_about`] to avoid trigonometric rounding.
    pub fn rotate_degrees(&self, center: &Coordinate, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Self::new(
            self.label.clone(),
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

// Coordinates are built from pixel geometry and never hold NaN.
impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bits(self.x).hash(state);
        hash_bits(self.y).hash(state);
    }
}

fn format_component(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", format_component(self.x), format_component(self.y))
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{self}")
        } else {
            write!(f, "{}{self}", self.label)
        }
    }
}

macro_rules! componentwise_op {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait<&Coordinate> for &Coordinate {
            type Output = Coordinate;

            fn $method(self, rhs: &Coordinate) -> Coordinate {
                let f = |$a: f64, $b: f64| $body;
                Coordinate::new(self.label.clone(), f(self.x, rhs.x), f(self.y, rhs.y))
            }
        }

        impl $trait for Coordinate {
            type Output = Coordinate;

            fn $method(self, rhs: Coordinate) -> Coordinate {
                (&self).$method(&rhs)
            }
        }
    };
}

componentwise_op!(Add, add, |a, b| a + b);
componentwise_op!(Sub, sub, |a, b| a - b);
componentwise_op!(Mul, mul, |a, b| a * b);
componentwise_op!(Div, div, |a, b| a / nonzero(b));
componentwise_op!(Rem, rem, |a, b| a % nonzero(b));

impl Neg for &Coordinate {
    type Output = Coordinate;

    fn neg(self) -> Coordinate {
        Coordinate::new(self.label.clone(), -self.x, -self.y)
    }
}

impl Neg for Coordinate {
    type Output = Coordinate;

    fn neg(self) -> Coordinate {
        -&self
    }
}

/// Axis-aligned clockwise rotation of a component image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Quarter),
            180 => Ok(Rotation::Half),
            270 => Ok(Rotation::ThreeQuarter),
            _ => Err(WiringError::UnsupportedRotation { degrees }),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }

    /// Apply `self`, then `other`.
    pub fn then(self, other: Rotation) -> Rotation {
        match (self.degrees() + other.degrees()) % 360 {
            90 => Rotation::Quarter,
            180 => Rotation::Half,
            270 => Rotation::ThreeQuarter,
            _ => Rotation::None,
        }
    }

    /// Whether width and height trade places.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Quarter | Rotation::ThreeQuarter)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = WiringError;

    fn try_from(degrees: i32) -> Result<Self> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> i32 {
        rotation.degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pt(x: f64, y: f64) -> Coordinate {
        Coordinate::at(x, y)
    }

    #[test]
    fn equality_ignores_label() {
        let a = Coordinate::new("LM Pin 1", 30.0, 15.0);
        let b = Coordinate::new("somewhere else", 30.0, 15.0);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn negative_zero_hashes_like_zero() {
        let mut set = HashSet::new();
        set.insert(pt(0.0, 5.0));
        assert!(set.contains(&pt(-0.0, 5.0)));
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = pt(6.0, 8.0);
        let b = pt(2.0, 4.0);
        assert_eq!(&a + &b, pt(8.0, 12.0));
        assert_eq!(&a - &b, pt(4.0, 4.0));
        assert_eq!(&a * &b, pt(12.0, 32.0));
        assert_eq!(&a / &b, pt(3.0, 2.0));
        assert_eq!(&a % &b, pt(0.0, 0.0));
        assert_eq!(-a, pt(-6.0, -8.0));
    }

    #[test]
    fn zero_divisor_is_treated_as_one() {
        let a = pt(6.0, 8.0);
        assert_eq!(&a / &pt(0.0, 2.0), pt(6.0, 4.0));
        assert_eq!(&a % &pt(0.0, 3.0), pt(0.0, 2.0));
        assert_eq!(a.powf(&pt(0.0, 2.0)), pt(6.0, 64.0));
    }

    #[test]
    fn result_keeps_left_label() {
        let a = Coordinate::new("anchor", 1.0, 1.0);
        let b = Coordinate::new("offset", 2.0, 2.0);
        assert_eq!((&a + &b).label, "anchor");
    }

    #[test]
    fn midpoint_of_pin_rectangle() {
        let lm = pt(90.0, 300.0);
        let rm = pt(111.0, 360.0);
        assert_eq!(lm.midpoint(&rm), pt(100.5, 330.0));
    }

    #[test]
    fn to_pixel_rounds() {
        assert_eq!(pt(100.5, 329.4).to_pixel(), (101, 329));
        assert_eq!(pt(-0.4, 0.6).to_pixel(), (0, 1));
    }

    #[test]
    fn rotate_quarter_about_center() {
        let center = pt(50.0, 50.0);
        // Right of center goes below it after a clockwise quarter turn.
        assert_eq!(pt(60.0, 50.0).rotate_about(&center, Rotation::Quarter), pt(50.0, 60.0));
        assert_eq!(pt(60.0, 50.0).rotate_about(&center, Rotation::Half), pt(40.0, 50.0));
        assert_eq!(
            pt(60.0, 50.0).rotate_about(&center, Rotation::ThreeQuarter),
            pt(50.0, 40.0)
        );
    }

    #[test]
    fn half_turn_twice_is_identity() {
        let center = pt(12.5, 7.0);
        let p = pt(100.5, 330.0);
        let back = p
            .rotate_about(&center, Rotation::Half)
            .rotate_about(&center, Rotation::Half);
        assert_eq!(back, p);
    }

    #[test]
    fn four_quarter_turns_in_frame_is_identity() {
        let (w, h) = (370.0, 400.0);
        let p = pt(100.5, 330.0);
        let r1 = p.rotate_in_frame(Rotation::Quarter, w, h);
        let r2 = r1.rotate_in_frame(Rotation::Quarter, h, w);
        let r3 = r2.rotate_in_frame(Rotation::Quarter, w, h);
        let r4 = r3.rotate_in_frame(Rotation::Quarter, h, w);
        assert_eq!(r4, p);
        assert_eq!(r2, p.rotate_in_frame(Rotation::Half, w, h));
    }

    #[test]
    fn quarter_then_three_quarter_in_frame_is_identity() {
        let p = pt(20.0, 5.0);
        let r = p
            .rotate_in_frame(Rotation::Quarter, 100.0, 40.0)
            .rotate_in_frame(Rotation::ThreeQuarter, 40.0, 100.0);
        assert_eq!(r, p);
    }

    #[test]
    fn trigonometric_rotation_agrees_with_exact_quarter() {
        let center = pt(0.0, 0.0);
        let p = pt(10.0, 3.0);
        let exact = p.rotate_about(&center, Rotation::Quarter);
        let trig = p.rotate_degrees(&center, 90.0);
        assert!((exact.x - trig.x).abs() < 1e-9);
        assert!((exact.y - trig.y).abs() < 1e-9);
    }

    #[test]
    fn rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::None);
        assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::ThreeQuarter);
        assert_eq!(
            Rotation::from_degrees(45),
            Err(WiringError::UnsupportedRotation { degrees: 45 })
        );
        assert!(Rotation::from_degrees(360).is_err());
    }

    #[test]
    fn rotation_composition() {
        assert_eq!(Rotation::Quarter.then(Rotation::Quarter), Rotation::Half);
        assert_eq!(Rotation::Half.then(Rotation::Half), Rotation::None);
        assert_eq!(
            Rotation::ThreeQuarter.then(Rotation::Half),
            Rotation::Quarter
        );
        assert!(Rotation::Quarter.swaps_axes());
        assert!(!Rotation::Half.swaps_axes());
    }

    #[test]
    fn display_drops_integer_decimals() {
        assert_eq!(pt(100.0, 330.0).to_string(), "(100,330)");
        assert_eq!(pt(100.5, 330.0).to_string(), "(100.5,330)");
    }
}
