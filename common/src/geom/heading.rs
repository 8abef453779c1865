use crate::error::PlotError;
use std::fmt;
use std::str::FromStr;

/// Compass heading in whole degrees, 0 = north, increasing clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Heading {
    degrees: u16,
}

impl Heading {
    pub fn new(degrees: u32) -> Self {
        Self {
            degrees: (degrees % 360) as u16,
        }
    }

    pub fn degrees(&self) -> u16 {
        self.degrees
    }

    /// Heading expressed as a mathematical angle (0 = east, counter-clockwise).
    pub fn drawing_angle_degrees(&self) -> u16 {
        ((450 - u32::from(self.degrees)) % 360) as u16
    }

    pub fn drawing_angle_radians(&self) -> f64 {
        f64::from(self.drawing_angle_degrees()).to_radians()
    }
}

impl FromStr for Heading {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlotError::heading(s));
        }
        let degrees: u32 = digits.parse().map_err(|_| PlotError::heading(s))?;
        Ok(Self::new(degrees))
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees)
    }
}
