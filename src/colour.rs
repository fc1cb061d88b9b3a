use std::fmt;
use std::str::FromStr;

/// An RGB colour with 8 bits per channel.
///
/// Colours take part in resource identity (pens and brushes are keyed by them), so
/// they are stored as integers rather than floats.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub const fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }

    /// Parse a hexadecimal `RRGGBB` value. A leading `#` or `0x` is accepted, and
    /// shorter values are zero-extended on the left (`ff` is pure blue).
    pub fn from_hex(text: &str) -> Result<Colour, String> {
        let text = text.trim();
        let digits = text
            .strip_prefix('#')
            .or_else(|| text.strip_prefix("0x"))
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);

        if digits.is_empty() || digits.len() > 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("'{text}' is not a hexadecimal RRGGBB colour"));
        }

        let value = u32::from_str_radix(digits, 16).map_err(|e| e.to_string())?;
        Ok(Colour {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }

    /// The colour's components scaled to the 0.0..=1.0 range PDF operators expect
    pub fn components(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl FromStr for Colour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::new_rgb_bytes(c.0, c.1, c.2)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::new_rgb_bytes(0, 0, 0);
    pub const WHITE: Colour = Colour::new_rgb_bytes(255, 255, 255);
    pub const RED: Colour = Colour::new_rgb_bytes(255, 0, 0);
    pub const GREEN: Colour = Colour::new_rgb_bytes(0, 255, 0);
    pub const BLUE: Colour = Colour::new_rgb_bytes(0, 0, 255);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_hex() {
        assert_eq!(Colour::from_hex("FF8000"), Ok(Colour::new_rgb_bytes(255, 128, 0)));
        assert_eq!(Colour::from_hex("#00ff00"), Ok(colours::GREEN));
        assert_eq!(Colour::from_hex("0x0000FF"), Ok(colours::BLUE));
        assert_eq!(Colour::from_hex("ff"), Ok(colours::BLUE));
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("1234567").is_err());
        assert!(Colour::from_hex("red").is_err());
        assert!(Colour::from_hex("-1").is_err());
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Colour::new_rgb_bytes(1, 2, 255).to_string(), "#0102FF");
    }
}
