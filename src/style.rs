//! Style specifications: the attribute tuples that identify fonts, pens and brushes.
//!
//! Two specs with identical attributes describe the same device resource; the
//! [`ResourceCache`](crate::ResourceCache) relies on the derived `Eq`/`Hash`.

use crate::colour::Colour;
use crate::layout::{Axis, LayoutValue};
use crate::pagesize::PageSpec;
use std::fmt;

/// Regular font weight
pub const WEIGHT_NORMAL: u16 = 400;

/// Bold font weight
pub const WEIGHT_BOLD: u16 = 700;

/// The kind of a device resource
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ResourceKind {
    Font,
    Pen,
    Brush,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Font => write!(f, "font"),
            ResourceKind::Pen => write!(f, "pen"),
            ResourceKind::Brush => write!(f, "brush"),
        }
    }
}

/// A font, identified by family name, cell height, average character width
/// (0 = the face's natural width), weight and underline.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FontSpec {
    pub name: String,
    /// Text cell height (ascent + descent) in native units
    pub size: i32,
    /// Average character width in native units, 0 for the natural width
    pub width: i32,
    pub weight: u16,
    pub underline: bool,
}

impl FontSpec {
    pub fn new<S: ToString>(name: S, size: i32) -> FontSpec {
        FontSpec {
            name: name.to_string(),
            size,
            width: 0,
            weight: WEIGHT_NORMAL,
            underline: false,
        }
    }

    pub fn bold(mut self) -> FontSpec {
        self.weight = WEIGHT_BOLD;
        self
    }

    pub fn underlined(mut self) -> FontSpec {
        self.underline = true;
        self
    }

    pub fn with_width(mut self, width: i32) -> FontSpec {
        self.width = width;
        self
    }

    /// Parse `name, size[:width][, bold][, underline]`. The size and width are
    /// layout tokens, resolved on the height and width axis respectively.
    pub fn parse(text: &str, page: &PageSpec) -> Result<FontSpec, String> {
        let mut parts = text.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err("missing font name".to_string());
        }

        let size = parts.next().ok_or("missing font size")?;
        let (height, width) = match size.split_once(':') {
            Some((height, width)) => (height, Some(width)),
            None => (size, None),
        };

        let mut spec = FontSpec::new(name, resolve_length(height, Axis::Height, page)?);
        if let Some(width) = width {
            spec.width = resolve_length(width, Axis::Width, page)?;
        }

        for flag in parts {
            match flag.to_ascii_lowercase().as_str() {
                "bold" => spec.weight = WEIGHT_BOLD,
                "underline" => spec.underline = true,
                "" => {}
                other => return Err(format!("unknown font flag '{other}'")),
            }
        }

        Ok(spec)
    }
}

/// A solid pen used for outlines and rules
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PenSpec {
    /// Line width in native units
    pub width: i32,
    pub colour: Colour,
}

impl PenSpec {
    /// Parse `width, RRGGBB`
    pub fn parse(text: &str, page: &PageSpec) -> Result<PenSpec, String> {
        let (width, colour) = text
            .split_once(',')
            .ok_or("expected 'width, colour'")?;
        Ok(PenSpec {
            width: resolve_length(width, Axis::Width, page)?,
            colour: Colour::from_hex(colour)?,
        })
    }
}

/// A solid fill
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct BrushSpec {
    pub colour: Colour,
}

/// The identity of any device resource
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum StyleSpec {
    Font(FontSpec),
    Pen(PenSpec),
    Brush(BrushSpec),
}

impl StyleSpec {
    pub fn kind(&self) -> ResourceKind {
        match self {
            StyleSpec::Font(_) => ResourceKind::Font,
            StyleSpec::Pen(_) => ResourceKind::Pen,
            StyleSpec::Brush(_) => ResourceKind::Brush,
        }
    }
}

impl From<FontSpec> for StyleSpec {
    fn from(spec: FontSpec) -> Self {
        StyleSpec::Font(spec)
    }
}

impl From<PenSpec> for StyleSpec {
    fn from(spec: PenSpec) -> Self {
        StyleSpec::Pen(spec)
    }
}

impl From<BrushSpec> for StyleSpec {
    fn from(spec: BrushSpec) -> Self {
        StyleSpec::Brush(spec)
    }
}

/// A text part's font together with its colour
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TextStyle {
    pub font: FontSpec,
    pub colour: Colour,
}

fn resolve_length(token: &str, axis: Axis, page: &PageSpec) -> Result<i32, String> {
    let value = LayoutValue::parse(token, axis).map_err(|e| e.to_string())?;
    value.check(page).map_err(|e| e.to_string())?;
    Ok(value.resolve(page))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pagesize::{Orientation, LETTER};

    fn page() -> PageSpec {
        PageSpec::new(LETTER, Orientation::Landscape)
    }

    #[test]
    fn parses_font_specs() {
        assert_eq!(
            FontSpec::parse("Arial, 300", &page()),
            Ok(FontSpec::new("Arial", 300))
        );
        assert_eq!(
            FontSpec::parse("Times New Roman, 250:90, bold, underline", &page()),
            Ok(FontSpec::new("Times New Roman", 250)
                .with_width(90)
                .bold()
                .underlined())
        );
        assert_eq!(
            FontSpec::parse("Arial, 0.25in, Bold", &page()).map(|f| (f.size, f.weight)),
            Ok((250, WEIGHT_BOLD))
        );
    }

    #[test]
    fn rejects_bad_font_specs() {
        assert!(FontSpec::parse("", &page()).is_err());
        assert!(FontSpec::parse("Arial", &page()).is_err());
        assert!(FontSpec::parse("Arial, big", &page()).is_err());
        assert!(FontSpec::parse("Arial, 300, italic", &page()).is_err());
    }

    #[test]
    fn parses_pens() {
        assert_eq!(
            PenSpec::parse("10, 808080", &page()),
            Ok(PenSpec {
                width: 10,
                colour: Colour::new_rgb_bytes(128, 128, 128)
            })
        );
        assert!(PenSpec::parse("10", &page()).is_err());
        assert!(PenSpec::parse("10, grey", &page()).is_err());
    }

    #[test]
    fn identical_attributes_are_equal_specs() {
        let a: StyleSpec = FontSpec::new("Arial", 300).into();
        let b: StyleSpec = FontSpec::new("Arial", 300).into();
        let c: StyleSpec = FontSpec::new("Arial", 301).into();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.kind(), ResourceKind::Font);
    }
}
