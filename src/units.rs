//! Measurement units.
//!
//! Layout and drawing happen in the document's *native unit*, a thousandth of an
//! inch, stored as `i32`. The PDF backend converts to [`Pt`] (1/72 inch) only when
//! it writes content streams.

use derive_more::{Add, AddAssign, Display, Div, From, Into, Mul, Sub, SubAssign, Sum};

/// Native units per inch. Every coordinate handed to a
/// [`DrawingSurface`](crate::DrawingSurface) uses this scale.
pub const NATIVE_PER_INCH: i32 = 1000;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Centimetres per inch
pub const CM_PER_INCH: f64 = 2.54;

/// PDF points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// A PDF point, 1/72 of an inch
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    Div,
    Sum,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

impl Pt {
    /// Convert a length in native units to points
    pub fn from_native(value: i32) -> Pt {
        Pt(value as f32 * POINTS_PER_INCH / NATIVE_PER_INCH as f32)
    }
}

/// Convert inches to native units (not rounded)
pub fn inches(value: f64) -> f64 {
    value * NATIVE_PER_INCH as f64
}

/// Convert millimetres to native units (not rounded)
pub fn millimetres(value: f64) -> f64 {
    value / MM_PER_INCH * NATIVE_PER_INCH as f64
}

/// Convert centimetres to native units (not rounded)
pub fn centimetres(value: f64) -> f64 {
    value / CM_PER_INCH * NATIVE_PER_INCH as f64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn one_inch_is_72_points() {
        assert_eq!(Pt::from_native(NATIVE_PER_INCH), Pt(72.0));
        assert_eq!(Pt::from_native(500), Pt(36.0));
    }

    #[test]
    fn metric_conversions_agree() {
        assert!((millimetres(25.4) - 1000.0).abs() < 1e-9);
        assert!((centimetres(2.54) - 1000.0).abs() < 1e-9);
        assert!((millimetres(10.0) - centimetres(1.0)).abs() < 1e-9);
    }
}
