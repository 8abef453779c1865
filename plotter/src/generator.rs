use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use planepal_common::geom::grid::{GRID_CELLS, Subdivision};

const GROUND: Rgba<u8> = Rgba([58, 82, 52, 255]);
const CELL_LINE: Rgba<u8> = Rgba([230, 230, 230, 255]);
const SECTION_LINE: Rgba<u8> = Rgba([96, 120, 90, 255]);

/// Synthetic square base map with the grid cells and their sections drawn in.
pub fn generate_base_map(size: u32, subdivision: Subdivision) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, GROUND);
    let cell = size as f32 / GRID_CELLS as f32;
    let per_side = subdivision.per_side();
    let last = (size - 1) as f32;

    for i in 0..GRID_CELLS * per_side {
        if i % per_side == 0 {
            continue;
        }
        let offset = (i as f32 * cell / per_side as f32).floor();
        draw_line_segment_mut(&mut img, (offset, 0.0), (offset, last), SECTION_LINE);
        draw_line_segment_mut(&mut img, (0.0, offset), (last, offset), SECTION_LINE);
    }

    for i in 0..=GRID_CELLS {
        let offset = (i as f32 * cell).min(last);
        draw_line_segment_mut(&mut img, (offset, 0.0), (offset, last), CELL_LINE);
        draw_line_segment_mut(&mut img, (0.0, offset), (last, offset), CELL_LINE);
    }

    log::debug!(
        "Generated {}x{} base map with {}x{} sections per cell",
        size,
        size,
        per_side,
        per_side
    );
    img
}
