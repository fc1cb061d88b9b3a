//! Pre-defined paper sizes and the document's page specification.
//!
//! All sizes are in native units (1/1000 inch) and given in portrait orientation
//! (width ≤ height). A [`PageSpec`] applies the configured [`Orientation`].
//!
//! # Available Sizes
//!
//! ## North American
//! `LETTER`, `HALF_LETTER`, `JUNIOR_LEGAL`, `LEGAL`, `TABLOID`, `LEDGER`
//!
//! ## ANSI
//! `ANSI_A` through `ANSI_E`
//!
//! ## ISO A-Series
//! `A0` through `A6`
//!
//! ## Traditional
//! `FOLIO`, `QUARTO`, `OCTAVO`

use crate::units::Pt;
use std::fmt;
use std::str::FromStr;

/// Paper dimensions as (width, height) in native units
pub type PaperSize = (i32, i32);

// north american sizes
pub const LETTER: PaperSize = (8500, 11000);
pub const HALF_LETTER: PaperSize = (5500, 8500);
pub const JUNIOR_LEGAL: PaperSize = (5000, 8000);
pub const LEGAL: PaperSize = (8500, 13000);
pub const TABLOID: PaperSize = (11000, 17000);
pub const LEDGER: PaperSize = (11000, 17000);

// ansi sizes
pub const ANSI_A: PaperSize = (8500, 11000);
pub const ANSI_B: PaperSize = (11000, 17000);
pub const ANSI_C: PaperSize = (17000, 22000);
pub const ANSI_D: PaperSize = (22000, 34000);
pub const ANSI_E: PaperSize = (34000, 44000);

// traditional sizes
pub const FOLIO: PaperSize = (12000, 19000);
pub const QUARTO: PaperSize = (9500, 12000);
pub const OCTAVO: PaperSize = (6000, 9000);

// iso a-series (converted from mm and rounded)
pub const A0: PaperSize = (33110, 46811);
pub const A1: PaperSize = (23386, 33110);
pub const A2: PaperSize = (16535, 23386);
pub const A3: PaperSize = (11693, 16535);
pub const A4: PaperSize = (8268, 11693);
pub const A5: PaperSize = (5827, 8268);
pub const A6: PaperSize = (4134, 5827);

/// Look up a paper size by its (case-insensitive) name, e.g. `letter` or `a4`
pub fn by_name(name: &str) -> Option<PaperSize> {
    let size = match name.trim().to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
        "letter" => LETTER,
        "half-letter" => HALF_LETTER,
        "junior-legal" => JUNIOR_LEGAL,
        "legal" => LEGAL,
        "tabloid" => TABLOID,
        "ledger" => LEDGER,
        "ansi-a" => ANSI_A,
        "ansi-b" => ANSI_B,
        "ansi-c" => ANSI_C,
        "ansi-d" => ANSI_D,
        "ansi-e" => ANSI_E,
        "folio" => FOLIO,
        "quarto" => QUARTO,
        "octavo" => OCTAVO,
        "a0" => A0,
        "a1" => A1,
        "a2" => A2,
        "a3" => A3,
        "a4" => A4,
        "a5" => A5,
        "a6" => A6,
        _ => return None,
    };
    Some(size)
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(format!("expected 'portrait' or 'landscape', found '{other}'")),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

/// The size of every page in the document. Fixed once the document starts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub width: i32,
    pub height: i32,
    pub orientation: Orientation,
}

impl PageSpec {
    /// Build a page spec from a paper size, swapping the dimensions as needed so that
    /// landscape pages are at least as wide as they are tall and portrait pages are
    /// at least as tall as they are wide
    pub fn new(size: PaperSize, orientation: Orientation) -> PageSpec {
        let (short, long) = if size.0 <= size.1 {
            size
        } else {
            (size.1, size.0)
        };
        let (width, height) = match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        };
        PageSpec {
            width,
            height,
            orientation,
        }
    }

    /// Page size in PDF points
    pub fn size_pt(&self) -> (Pt, Pt) {
        (Pt::from_native(self.width), Pt::from_native(self.height))
    }
}
