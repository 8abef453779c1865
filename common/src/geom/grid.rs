use crate::error::PlotError;
use std::fmt;

/// Number of grid cells along each side of a map.
pub const GRID_CELLS: u32 = 8;

/// 3x3 sub-sections in each grid cell.
pub const DEFAULT_MAX_SECTIONS: u32 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn first_letter(self) -> char {
        match self {
            Axis::X => 'a',
            Axis::Y => 'i',
        }
    }

    pub fn last_letter(self) -> char {
        (self.first_letter() as u8 + GRID_CELLS as u8 - 1) as char
    }

    /// Zero based cell index of `letter` on this axis, if it is in range.
    pub fn index_of(self, letter: char) -> Option<u8> {
        let letter = letter.to_ascii_lowercase();
        if (self.first_letter()..=self.last_letter()).contains(&letter) {
            Some(letter as u8 - self.first_letter() as u8)
        } else {
            None
        }
    }

    pub fn letter(self, index: u8) -> char {
        (self.first_letter() as u8 + index) as char
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrder {
    AsWritten,
    Swapped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAxes {
    pub x: u8,
    pub y: u8,
    pub order: AxisOrder,
}

/// Assigns two grid letters to the X and Y axes.
///
/// The letters are first read in the order they were written. When
/// `allow_swap` is set and that fails, the reverse assignment is tried.
/// On failure the axis that could not be satisfied is returned.
pub fn resolve_axes(first: char, second: char, allow_swap: bool) -> Result<ResolvedAxes, Axis> {
    let as_written = (Axis::X.index_of(first), Axis::Y.index_of(second));
    if let (Some(x), Some(y)) = as_written {
        return Ok(ResolvedAxes {
            x,
            y,
            order: AxisOrder::AsWritten,
        });
    }

    if allow_swap
        && let (Some(x), Some(y)) = (Axis::X.index_of(second), Axis::Y.index_of(first))
    {
        return Ok(ResolvedAxes {
            x,
            y,
            order: AxisOrder::Swapped,
        });
    }

    match as_written {
        (None, _) => Err(Axis::X),
        _ => Err(Axis::Y),
    }
}

/// Square sub-division of a grid cell into `per_side * per_side` sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subdivision {
    per_side: u32,
}

impl Subdivision {
    pub fn from_max_sections(max_sections: u32) -> Result<Self, PlotError> {
        let per_side = (max_sections as f64).sqrt().round() as u32;
        if max_sections == 0 || per_side.checked_mul(per_side) != Some(max_sections) {
            return Err(PlotError::InvalidConfig(format!(
                "max_sections must be a non-zero perfect square, got {}",
                max_sections
            )));
        }
        Ok(Self { per_side })
    }

    pub fn per_side(&self) -> u32 {
        self.per_side
    }

    pub fn max_sections(&self) -> u32 {
        self.per_side * self.per_side
    }

    pub fn contains(&self, section: u32) -> bool {
        (1..=self.max_sections()).contains(&section)
    }
}

impl Default for Subdivision {
    fn default() -> Self {
        Self { per_side: 3 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    x: u8,
    y: u8,
    section: Option<u32>,
    subdivision: Subdivision,
}

impl GridCoordinate {
    pub fn new(
        x: u8,
        y: u8,
        section: Option<u32>,
        subdivision: Subdivision,
    ) -> Result<Self, PlotError> {
        if u32::from(x) >= GRID_CELLS {
            return Err(PlotError::grid_axis(format!("x index {}", x), Axis::X));
        }
        if u32::from(y) >= GRID_CELLS {
            return Err(PlotError::grid_axis(format!("y index {}", y), Axis::Y));
        }
        if let Some(section) = section
            && !subdivision.contains(section)
        {
            return Err(PlotError::grid(format!(
                "section {} outside 1..={}",
                section,
                subdivision.max_sections()
            )));
        }

        Ok(Self {
            x,
            y,
            section,
            subdivision,
        })
    }

    pub fn x_index(&self) -> u8 {
        self.x
    }

    pub fn y_index(&self) -> u8 {
        self.y
    }

    pub fn section(&self) -> Option<u32> {
        self.section
    }

    /// Offset of the targeted point from the top-left corner of the cell.
    ///
    /// Columns run left to right. Rows are counted from the bottom of the
    /// cell, so with a 3x3 subdivision sections are laid out like a keypad:
    /// 1 is bottom-left and 9 is top-right.
    pub fn section_offset(&self, pixels_per_km: f64) -> (f64, f64) {
        let Some(section) = self.section else {
            return (pixels_per_km / 2.0, pixels_per_km / 2.0);
        };

        // (c / k + 1 / 2k) * ppk, folded into a single division so whole
        // pixel results stay exact.
        let per_side = self.subdivision.per_side();
        let index = section - 1;
        let column = index % per_side;
        let row = index / per_side;
        let steps = (2 * per_side) as f64;

        (
            (2 * column + 1) as f64 * pixels_per_km / steps,
            (2 * (per_side - row) - 1) as f64 * pixels_per_km / steps,
        )
    }

    pub fn project_exact(&self, pixels_per_km: f64) -> (f64, f64) {
        let (offset_x, offset_y) = self.section_offset(pixels_per_km);
        (
            self.x as f64 * pixels_per_km + offset_x,
            self.y as f64 * pixels_per_km + offset_y,
        )
    }

    /// Absolute pixel position on a map with `pixels_per_km` pixels per cell.
    pub fn project(&self, pixels_per_km: u32) -> (i32, i32) {
        let (x, y) = self.project_exact(pixels_per_km as f64);
        (x as i32, y as i32)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            Axis::X.letter(self.x).to_ascii_uppercase(),
            Axis::Y.letter(self.y).to_ascii_uppercase()
        )?;
        if let Some(section) = self.section {
            write!(f, "{}", section)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: u8, y: u8, section: Option<u32>) -> GridCoordinate {
        GridCoordinate::new(x, y, section, Subdivision::default()).unwrap()
    }

    #[test]
    fn test_axis_letters() {
        assert_eq!(Axis::X.index_of('a'), Some(0));
        assert_eq!(Axis::X.index_of('H'), Some(7));
        assert_eq!(Axis::X.index_of('i'), None);
        assert_eq!(Axis::Y.index_of('i'), Some(0));
        assert_eq!(Axis::Y.index_of('P'), Some(7));
        assert_eq!(Axis::Y.index_of('q'), None);
        assert_eq!(Axis::Y.letter(2), 'k');
    }

    #[test]
    fn test_resolve_axes_as_written() {
        let axes = resolve_axes('a', 'k', false).unwrap();
        assert_eq!((axes.x, axes.y), (0, 2));
        assert_eq!(axes.order, AxisOrder::AsWritten);
    }

    #[test]
    fn test_resolve_axes_swapped() {
        assert_eq!(resolve_axes('k', 'a', false), Err(Axis::X));

        let axes = resolve_axes('k', 'a', true).unwrap();
        assert_eq!((axes.x, axes.y), (0, 2));
        assert_eq!(axes.order, AxisOrder::Swapped);
    }

    #[test]
    fn test_resolve_axes_reports_axis() {
        assert_eq!(resolve_axes('a', 'b', true), Err(Axis::Y));
        assert_eq!(resolve_axes('k', 'l', true), Err(Axis::X));
    }

    #[test]
    fn test_subdivision_requires_square() {
        assert_eq!(Subdivision::from_max_sections(9).unwrap().per_side(), 3);
        assert_eq!(Subdivision::from_max_sections(16).unwrap().per_side(), 4);
        assert!(Subdivision::from_max_sections(8).is_err());
        assert!(Subdivision::from_max_sections(0).is_err());
        assert!(Subdivision::from_max_sections(u32::MAX).is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let sub = Subdivision::default();
        assert!(GridCoordinate::new(8, 0, None, sub).is_err());
        assert!(GridCoordinate::new(0, 8, None, sub).is_err());
        assert!(GridCoordinate::new(0, 0, Some(10), sub).is_err());
        assert!(GridCoordinate::new(0, 0, Some(0), sub).is_err());
    }

    #[test]
    fn test_projection_steps_by_cell() {
        for x in 0..7 {
            for y in 0..7 {
                let (px, py) = cell(x, y, Some(4)).project(100);
                let (nx, _) = cell(x + 1, y, Some(4)).project(100);
                let (_, ny) = cell(x, y + 1, Some(4)).project(100);
                assert_eq!(nx - px, 100);
                assert_eq!(ny - py, 100);
            }
        }
    }

    #[test]
    fn test_center_projection() {
        assert_eq!(cell(0, 2, None).project(100), (50, 250));
        assert_eq!(cell(7, 7, None).project(100), (750, 750));
    }

    #[test]
    fn test_section_one_is_bottom_left() {
        assert_eq!(cell(0, 2, Some(1)).project(100), (16, 283));
        assert_eq!(cell(0, 2, Some(9)).project(100), (83, 216));
    }

    #[test]
    fn test_middle_section_matches_center() {
        assert_eq!(cell(3, 4, Some(5)).project(96), cell(3, 4, None).project(96));
    }

    #[test]
    fn test_center_is_mean_of_sections() {
        for max_sections in [4, 9, 16] {
            let sub = Subdivision::from_max_sections(max_sections).unwrap();
            let center = GridCoordinate::new(2, 5, None, sub).unwrap().project_exact(120.0);

            let (mut sum_x, mut sum_y) = (0.0, 0.0);
            for section in 1..=max_sections {
                let (x, y) = GridCoordinate::new(2, 5, Some(section), sub)
                    .unwrap()
                    .project_exact(120.0);
                sum_x += x;
                sum_y += y;
            }

            let n = max_sections as f64;
            assert!((sum_x / n - center.0).abs() < 1e-9);
            assert!((sum_y / n - center.1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(cell(0, 2, Some(1)).to_string(), "AK1");
        assert_eq!(cell(4, 7, None).to_string(), "EP");
    }
}
