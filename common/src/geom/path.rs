use super::grid::GridCoordinate;
use super::heading::Heading;
use std::fmt;

/// A plane entering the map at `grid` and flying along `heading`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PathDescriptor {
    grid: GridCoordinate,
    heading: Heading,
}

impl PathDescriptor {
    pub fn new(grid: GridCoordinate, heading: Heading) -> Self {
        Self { grid, heading }
    }

    pub fn grid(&self) -> &GridCoordinate {
        &self.grid
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }
}

impl fmt::Display for PathDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.grid, self.heading)
    }
}
