use crate::draw::{DrawingContext, rgba, triangle_vertices};
use crate::projector::{Projection, Projector};
use image::RgbaImage;
use planepal_common::geom::path::PathDescriptor;
use planepal_common::util::config::RenderConfig;

/// Draws a plane's flight line and parachute bands onto copies of a map.
#[derive(Debug, Clone)]
pub struct PathRenderer {
    config: RenderConfig,
}

impl PathRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Renders `path` onto a copy of `base`. `base` itself is never modified.
    pub fn render(&self, base: &RgbaImage, path: &PathDescriptor) -> RgbaImage {
        let (width, height) = base.dimensions();
        let projector = Projector::for_canvas(width);
        let projection = projector.project(path);
        let (start, end) = path_endpoints(&projection, diagonal_length(width, height));

        log::debug!(
            "Rendering {} at ({}, {}) on {}x{} map, {} px/km",
            path,
            projection.x,
            projection.y,
            width,
            height,
            projector.pixels_per_km()
        );

        // Bands cover both sides of the line, so their radius is doubled.
        let long_width = projector.km_to_pixels(self.config.long_parachute_path_width_km) * 2.0;
        let short_width = projector.km_to_pixels(self.config.short_parachute_path_width_km) * 2.0;
        let plane_width = projector.km_to_pixels(self.config.plane_path_width_km);

        let mut ctx = DrawingContext::acquire(base);

        // Widest first so narrower layers stay visible on top.
        for (band_width, color) in [
            (long_width as u32, self.config.long_parachute_path_color),
            (short_width as u32, self.config.short_parachute_path_color),
        ] {
            if band_width > 0 {
                ctx.line(start, end, band_width, rgba(color));
            }
        }
        ctx.line(start, end, plane_width as u32, rgba(self.config.plane_path_color));

        if self.config.triangle_size_km > 0.0 {
            let side = projector.km_to_pixels(self.config.triangle_size_km);
            let center = (projection.x as f64, projection.y as f64);
            ctx.polygon(
                &triangle_vertices(center, side, projection.angle),
                rgba(self.config.triangle_color),
            );
        }

        ctx.finish()
    }
}

/// Length that reaches past every edge of the canvas from any point on it.
pub fn diagonal_length(width: u32, height: u32) -> f64 {
    let (w, h) = (width as f64, height as f64);
    (w * w + h * h).sqrt().ceil()
}

/// Endpoints `length` pixels behind and ahead of the projected point.
pub fn path_endpoints(projection: &Projection, length: f64) -> ((f64, f64), (f64, f64)) {
    let (x, y) = (projection.x as f64, projection.y as f64);
    let (sin, cos) = projection.angle.sin_cos();
    // Pixel rows grow downwards, hence the flipped y terms.
    (
        (x - length * cos, y + length * sin),
        (x + length * cos, y - length * sin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use planepal_common::parser::CommandParser;
    use planepal_common::util::color::Color;
    use planepal_common::util::config::ParserConfig;

    const GROUND: Rgba<u8> = Rgba([20, 60, 20, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const ORANGE: Rgba<u8> = Rgba([255, 165, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn path(message: &str) -> PathDescriptor {
        CommandParser::new(&ParserConfig::default())
            .unwrap()
            .parse(message)
            .unwrap()
    }

    fn no_marker() -> RenderConfig {
        RenderConfig {
            triangle_size_km: 0.0,
            ..RenderConfig::default()
        }
    }

    fn ground(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, GROUND)
    }

    #[test]
    fn test_diagonal_length() {
        assert_eq!(diagonal_length(3, 4), 5.0);
        assert_eq!(diagonal_length(80, 80), 114.0);
    }

    #[test]
    fn test_endpoints_horizontal() {
        let projection = Projection {
            x: 16,
            y: 283,
            angle: 0.0,
        };
        let (start, end) = path_endpoints(&projection, 1132.0);
        assert_eq!(start, (16.0 - 1132.0, 283.0));
        assert_eq!(end, (16.0 + 1132.0, 283.0));
    }

    #[test]
    fn test_layers_east_bound() {
        let image = PathRenderer::new(no_marker()).render(&ground(80), &path("ak 90"));

        // Point is (5, 25) with 10 px/km.
        assert_eq!(*image.get_pixel(40, 25), WHITE);
        assert_eq!(*image.get_pixel(40, 33), RED);
        assert_eq!(*image.get_pixel(40, 17), RED);
        assert_eq!(*image.get_pixel(40, 50), ORANGE);
        assert_eq!(*image.get_pixel(40, 70), GROUND);
    }

    #[test]
    fn test_north_bound_line_is_vertical() {
        let image = PathRenderer::new(no_marker()).render(&ground(80), &path("ak 0"));

        assert_eq!(*image.get_pixel(5, 0), WHITE);
        assert_eq!(*image.get_pixel(5, 79), WHITE);
        assert_eq!(*image.get_pixel(13, 60), RED);
        assert_eq!(*image.get_pixel(70, 60), GROUND);
    }

    #[test]
    fn test_marker_points_forward() {
        let config = RenderConfig {
            triangle_size_km: 2.0,
            triangle_color: Color::rgb(0, 0, 255),
            ..RenderConfig::default()
        };
        let renderer = PathRenderer::new(config);

        // Point is (15, 45).
        let east = renderer.render(&ground(80), &path("bm 90"));
        assert_eq!(*east.get_pixel(15, 45), BLUE);
        assert_eq!(*east.get_pixel(23, 45), BLUE);
        assert_eq!(*east.get_pixel(8, 45), WHITE);

        let west = renderer.render(&ground(80), &path("bm 270"));
        assert_eq!(*west.get_pixel(7, 45), BLUE);
        assert_eq!(*west.get_pixel(22, 45), WHITE);
    }

    #[test]
    fn test_zero_width_bands_are_skipped() {
        let config = RenderConfig {
            short_parachute_path_width_km: 0.0,
            long_parachute_path_width_km: 0.0,
            ..no_marker()
        };
        let image = PathRenderer::new(config).render(&ground(80), &path("ak 90"));
        assert_eq!(*image.get_pixel(40, 25), WHITE);
        assert_eq!(*image.get_pixel(40, 33), GROUND);
    }
}
