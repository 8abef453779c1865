use crate::error::PlotError;
use serde::Deserialize;
use std::str::FromStr;

/// RGBA fill color for one plotted layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub [u8; 4]);

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("orange", [255, 165, 0]),
    ("yellow", [255, 255, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("purple", [128, 0, 128]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
];

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn channels(&self) -> [u8; 4] {
        self.0
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let parsed = match name.strip_prefix('#') {
            Some(hex) => Color::from_hex(hex),
            None => NAMED_COLORS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, [r, g, b])| Color::rgb(*r, *g, *b)),
        };
        parsed.ok_or_else(|| PlotError::InvalidConfig(format!("unknown color '{}'", s)))
    }
}

impl TryFrom<String> for Color {
    type Error = PlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!("orange".parse::<Color>().unwrap(), Color::ORANGE);
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!("#f00".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("#10203a".parse::<Color>().unwrap(), Color::rgb(16, 32, 58));
        assert_eq!(
            "#ff000080".parse::<Color>().unwrap(),
            Color::rgba(255, 0, 0, 128)
        );
    }

    #[test]
    fn test_rejects_unknown() {
        assert!("chartreuse-ish".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }
}
