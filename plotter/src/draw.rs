use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::{Blend, Canvas, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use planepal_common::util::color::Color;

/// Unit equilateral triangle centered on its centroid, apex facing east.
const UNIT_TRIANGLE: [(f64, f64); 3] = [
    (0.577_350_269_189_625_8, 0.0),
    (-0.288_675_134_594_812_9, 0.5),
    (-0.288_675_134_594_812_9, -0.5),
];

pub fn rgba(color: Color) -> Rgba<u8> {
    Rgba(color.channels())
}

/// Exclusive drawing handle over a private copy of a canvas.
///
/// Colors are alpha blended onto what is already there. The copy is only
/// handed back through [`DrawingContext::finish`].
pub struct DrawingContext {
    canvas: Blend<RgbaImage>,
}

impl DrawingContext {
    pub fn acquire(base: &RgbaImage) -> Self {
        Self {
            canvas: Blend(base.clone()),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.0.dimensions()
    }

    /// Straight line `width` pixels wide, centered on the segment.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), width: u32, color: Rgba<u8>) {
        if width < 2 {
            draw_line_segment_mut(
                &mut self.canvas,
                (from.0 as f32, from.1 as f32),
                (to.0 as f32, to.1 as f32),
                color,
            );
            return;
        }

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return;
        }
        let half = width as f64 / 2.0;
        let (nx, ny) = (-dy / length * half, dx / length * half);

        let corners = [
            (from.0 + nx, from.1 + ny),
            (to.0 + nx, to.1 + ny),
            (to.0 - nx, to.1 - ny),
            (from.0 - nx, from.1 - ny),
        ];
        self.polygon(&corners, color);
    }

    pub fn polygon(&mut self, vertices: &[(f64, f64)], color: Rgba<u8>) {
        let mut points: Vec<Point<i32>> = Vec::with_capacity(vertices.len());
        for &(x, y) in vertices {
            let point = Point::new(x.round() as i32, y.round() as i32);
            if points.last() != Some(&point) {
                points.push(point);
            }
        }
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return;
        }
        if color[3] == u8::MAX {
            draw_polygon_mut(&mut self.canvas, &points, color);
            return;
        }

        // The outline is stroked over the fill, so rasterize once and blend
        // each covered pixel a single time.
        let (width, height) = self.dimensions();
        let mut mask = GrayImage::new(width, height);
        draw_polygon_mut(&mut mask, &points, Luma([u8::MAX]));
        for (x, y, covered) in mask.enumerate_pixels() {
            if covered[0] != 0 {
                self.canvas.draw_pixel(x, y, color);
            }
        }
    }

    pub fn finish(self) -> RgbaImage {
        self.canvas.0
    }
}

/// Equilateral triangle with its centroid on `center` and its apex along
/// `angle` (radians, counter-clockwise from east, y axis pointing up).
pub fn triangle_vertices(center: (f64, f64), side: f64, angle: f64) -> [(f64, f64); 3] {
    // Pixel rows grow downwards, so the template turns the other way.
    let (sin, cos) = (-angle).sin_cos();
    UNIT_TRIANGLE.map(|(tx, ty)| {
        let (x, y) = (tx * side, ty * side);
        (
            center.0 + x * cos - y * sin,
            center.1 + x * sin + y * cos,
        )
    })
}
