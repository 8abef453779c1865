use planepal_common::geom::grid::GRID_CELLS;
use planepal_common::geom::path::PathDescriptor;

/// Pixel position and drawing angle (radians) of a projected path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub x: i32,
    pub y: i32,
    pub angle: f64,
}

/// Maps grid positions onto a canvas whose width spans `GRID_CELLS` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projector {
    pixels_per_km: u32,
}

impl Projector {
    pub fn new(pixels_per_km: u32) -> Self {
        Self { pixels_per_km }
    }

    pub fn for_canvas(width: u32) -> Self {
        Self::new(width / GRID_CELLS)
    }

    pub fn pixels_per_km(&self) -> u32 {
        self.pixels_per_km
    }

    pub fn km_to_pixels(&self, km: f64) -> f64 {
        km * self.pixels_per_km as f64
    }

    pub fn project(&self, path: &PathDescriptor) -> Projection {
        let (x, y) = path.grid().project(self.pixels_per_km);
        Projection {
            x,
            y,
            angle: path.heading().drawing_angle_radians(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planepal_common::parser::CommandParser;
    use planepal_common::util::config::ParserConfig;

    fn path(message: &str) -> PathDescriptor {
        CommandParser::new(&ParserConfig::default())
            .unwrap()
            .parse(message)
            .unwrap()
    }

    #[test]
    fn test_scale_from_width() {
        assert_eq!(Projector::for_canvas(800).pixels_per_km(), 100);
        assert_eq!(Projector::for_canvas(1023).pixels_per_km(), 127);
        assert!((Projector::new(100).km_to_pixels(1.4) - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_section_one() {
        let projection = Projector::for_canvas(800).project(&path("ak1 90"));
        assert_eq!((projection.x, projection.y), (16, 283));
        assert!(projection.angle.abs() < f64::EPSILON);
    }

    #[test]
    fn test_project_center() {
        let projection = Projector::for_canvas(800).project(&path("hp 180"));
        assert_eq!((projection.x, projection.y), (750, 750));
        assert!((projection.angle - 270f64.to_radians()).abs() < 1e-12);
    }
}
