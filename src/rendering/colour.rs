//! 24-bit colours and name/hex parsing.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// A 24-bit RGB colour
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Each channel multiplied by `factor`, truncated toward zero.
    /// `factor` is clamped to 0.0..=1.0.
    pub fn scaled(self, factor: f32) -> Self {
        let t = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (t * f32::from(c)) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

static NAMED: LazyLock<HashMap<&'static str, Rgb>> = LazyLock::new(|| {
    HashMap::from([
        ("black", Rgb::new(0, 0, 0)),
        ("white", Rgb::new(255, 255, 255)),
        ("red", Rgb::new(255, 0, 0)),
        ("lime", Rgb::new(0, 255, 0)),
        ("blue", Rgb::new(0, 0, 255)),
        ("yellow", Rgb::new(255, 255, 0)),
        ("cyan", Rgb::new(0, 255, 255)),
        ("magenta", Rgb::new(255, 0, 255)),
        ("silver", Rgb::new(192, 192, 192)),
        ("maroon", Rgb::new(192, 0, 0)),
        ("olive", Rgb::new(128, 128, 0)),
        ("green", Rgb::new(0, 128, 0)),
        ("purple", Rgb::new(128, 0, 128)),
        ("teal", Rgb::new(0, 128, 128)),
        ("navy", Rgb::new(0, 0, 128)),
    ])
});

/// Resolve a colour given as `#RRGGBB` or as one of the known names.
/// Names are case-sensitive.
pub fn parse_colour(name: &str) -> Result<Rgb> {
    if let Some(rgb) = parse_hex(name) {
        return Ok(rgb);
    }
    NAMED
        .get(name)
        .copied()
        .ok_or_else(|| Error::UnknownColour(name.to_owned()))
}

fn parse_hex(code: &str) -> Option<Rgb> {
    let hex = code.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colours() {
        assert_eq!(parse_colour("green"), Ok(Rgb::new(0, 128, 0)));
        assert_eq!(parse_colour("cyan"), Ok(Rgb::new(0, 255, 255)));
        assert_eq!(parse_colour("navy"), Ok(Rgb::new(0, 0, 128)));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(matches!(parse_colour("Green"), Err(Error::UnknownColour(_))));
    }

    #[test]
    fn test_hex_codes() {
        assert_eq!(parse_colour("#ff8000"), Ok(Rgb::new(255, 128, 0)));
        assert_eq!(parse_colour("#00A0fF"), Ok(Rgb::new(0, 160, 255)));
    }

    #[test]
    fn test_malformed_hex_rejected() {
        assert!(parse_colour("#ff80").is_err());
        assert!(parse_colour("#gg0000").is_err());
        assert!(parse_colour("ff8000").is_err());
    }

    #[test]
    fn test_scaled_truncates() {
        assert_eq!(Rgb::new(255, 100, 3).scaled(0.5), Rgb::new(127, 50, 1));
        assert_eq!(Rgb::WHITE.scaled(2.0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.scaled(-1.0), Rgb::BLACK);
    }
}
