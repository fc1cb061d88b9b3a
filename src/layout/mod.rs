//! Resolution of symbolic layout values into native device coordinates.
//!
//! Layout entries in the configuration are comma-separated *layout tuples* such as
//! `5%, 1in, 95%, 30mm`. Each token is a number with an optional unit suffix:
//!
//! | token   | meaning                                              |
//! |---------|------------------------------------------------------|
//! | `1250`  | native units (1/1000 inch)                           |
//! | `12.5%` | percentage of the page width or height               |
//! | `1.25in`| inches                                               |
//! | `30mm`  | millimetres                                          |
//! | `3cm`   | centimetres                                          |
//!
//! Within a tuple the token at an even position resolves against the page width and
//! the token at an odd position against the page height, so a box `L, T, R, B` is
//! resolved as width, height, width, height.
//!
//! ```
//! use pdf_calendar::layout::{resolve, Axis};
//!
//! assert_eq!(resolve("50%", Axis::Width, 11000, 8500), Ok(5500));
//! assert_eq!(resolve("1in", Axis::Height, 11000, 8500), Ok(1000));
//! ```

mod geometry;
mod grid;
mod margins;

pub use geometry::*;
pub use grid::*;
pub use margins::*;

use crate::pagesize::PageSpec;
use crate::units;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit0, digit1, one_of};
use nom::combinator::{all_consuming, opt, recognize, value};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors produced while parsing layout tokens and tuples
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutParseError {
    #[error("'{0}' is not a layout value (expected a number with an optional %, in, mm or cm suffix)")]
    Malformed(String),

    #[error("'{0}' does not fit in the native coordinate range")]
    OutOfRange(String),

    #[error("expected {expected} comma-separated values, found {found}")]
    Arity { expected: usize, found: usize },
}

/// The page dimension a layout value is measured against
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    /// The axis used by the token at `position` within a layout tuple
    pub fn for_position(position: usize) -> Axis {
        if position % 2 == 0 {
            Axis::Width
        } else {
            Axis::Height
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Suffix {
    Percent,
    Inch,
    Millimetre,
    Centimetre,
}

/// A single parsed layout token
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LayoutToken {
    /// Already in native units
    Native(i32),
    Percent(f64),
    Inches(f64),
    Millimetres(f64),
    Centimetres(f64),
}

fn number(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(one_of("+-")),
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
    ))
    .parse(input)
}

fn suffix(input: &str) -> IResult<&str, Suffix> {
    alt((
        value(Suffix::Percent, char('%')),
        value(Suffix::Inch, tag_no_case("in")),
        value(Suffix::Millimetre, tag_no_case("mm")),
        value(Suffix::Centimetre, tag_no_case("cm")),
    ))
    .parse(input)
}

impl LayoutToken {
    /// Parse a single token, ignoring surrounding whitespace
    pub fn parse(token: &str) -> Result<LayoutToken, LayoutParseError> {
        let trimmed = token.trim();
        let malformed = || LayoutParseError::Malformed(trimmed.to_string());

        let (_, (digits, suffix)) = all_consuming((number, opt(suffix)))
            .parse(trimmed)
            .map_err(|_| malformed())?;

        match suffix {
            None => {
                // bare numbers are native units, which are integral
                if digits.contains('.') {
                    return Err(malformed());
                }
                digits
                    .parse::<i32>()
                    .map(LayoutToken::Native)
                    .map_err(|_| LayoutParseError::OutOfRange(trimmed.to_string()))
            }
            Some(suffix) => {
                let v: f64 = digits.parse().map_err(|_| malformed())?;
                Ok(match suffix {
                    Suffix::Percent => LayoutToken::Percent(v),
                    Suffix::Inch => LayoutToken::Inches(v),
                    Suffix::Millimetre => LayoutToken::Millimetres(v),
                    Suffix::Centimetre => LayoutToken::Centimetres(v),
                })
            }
        }
    }

    /// Whether the token depends on the page size
    pub fn is_relative(&self) -> bool {
        matches!(self, LayoutToken::Percent(_))
    }

    /// Resolve to native units against explicit page dimensions
    pub fn resolve_with(
        &self,
        axis: Axis,
        page_width: i32,
        page_height: i32,
    ) -> Result<i32, LayoutParseError> {
        let exact = match *self {
            LayoutToken::Native(v) => return Ok(v),
            LayoutToken::Percent(p) => {
                let dimension = match axis {
                    Axis::Width => page_width,
                    Axis::Height => page_height,
                };
                p / 100.0 * dimension as f64
            }
            LayoutToken::Inches(v) => units::inches(v),
            LayoutToken::Millimetres(v) => units::millimetres(v),
            LayoutToken::Centimetres(v) => units::centimetres(v),
        };

        let rounded = exact.round();
        if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
            return Err(LayoutParseError::OutOfRange(format!("{self:?}")));
        }
        Ok(rounded as i32)
    }
}

/// Resolve a single layout token into native units.
///
/// `%` is relative to `page_width` on [`Axis::Width`] and to `page_height` on
/// [`Axis::Height`]; all other forms ignore the page.
pub fn resolve(
    token: &str,
    axis: Axis,
    page_width: i32,
    page_height: i32,
) -> Result<i32, LayoutParseError> {
    LayoutToken::parse(token)?.resolve_with(axis, page_width, page_height)
}

/// A layout token paired with the axis it is measured on
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutValue {
    pub token: LayoutToken,
    pub axis: Axis,
}

impl LayoutValue {
    pub fn parse(token: &str, axis: Axis) -> Result<LayoutValue, LayoutParseError> {
        Ok(LayoutValue {
            token: LayoutToken::parse(token)?,
            axis,
        })
    }

    /// Resolve against the document's page. Values are range-checked when the
    /// configuration is loaded, so resolution itself cannot fail.
    pub fn resolve(&self, page: &PageSpec) -> i32 {
        self.token
            .resolve_with(self.axis, page.width, page.height)
            .unwrap_or_default()
    }

    pub(crate) fn check(&self, page: &PageSpec) -> Result<(), LayoutParseError> {
        self.token
            .resolve_with(self.axis, page.width, page.height)
            .map(|_| ())
    }
}

/// A fixed-length, comma-separated list of layout values alternating between the
/// width and height axes
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutTuple<const N: usize> {
    values: [LayoutValue; N],
}

/// An (x, y) position
pub type PointLayout = LayoutTuple<2>;

/// A (left, top, right, bottom) box
pub type BoxLayout = LayoutTuple<4>;

impl<const N: usize> LayoutTuple<N> {
    pub fn parse(text: &str) -> Result<LayoutTuple<N>, LayoutParseError> {
        let tokens: Vec<&str> = text.split(',').collect();
        if tokens.len() != N {
            return Err(LayoutParseError::Arity {
                expected: N,
                found: tokens.len(),
            });
        }

        let mut values = [LayoutValue {
            token: LayoutToken::Native(0),
            axis: Axis::Width,
        }; N];
        for (i, token) in tokens.into_iter().enumerate() {
            values[i] = LayoutValue::parse(token, Axis::for_position(i))?;
        }
        Ok(LayoutTuple { values })
    }

    pub fn values(&self) -> &[LayoutValue; N] {
        &self.values
    }

    /// Resolve every value against the page
    pub fn resolve(&self, page: &PageSpec) -> [i32; N] {
        self.values.map(|v| v.resolve(page))
    }

    pub(crate) fn check(&self, page: &PageSpec) -> Result<(), LayoutParseError> {
        self.values.iter().try_for_each(|v| v.check(page))
    }
}
