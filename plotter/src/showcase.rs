use crate::Plotter;
use crate::output::OutputStore;
use anyhow::Result;
use image::imageops::{self, FilterType};
use planepal_common::error::PlotError;
use rayon::prelude::*;
use std::path::PathBuf;

/// Example paths rendered for documentation, as `(map, message)`.
pub const SHOWCASE: &[(&str, &str)] = &[
    ("erangel", "90 ak1"),
    ("erangel", "105 al7"),
    ("erangel", "355 ep"),
    ("erangel", "330 gp7"),
    ("erangel", "275 hn"),
    ("miramar", "115 al"),
    ("miramar", "175 ei1"),
    ("miramar", "280 ho"),
];

/// Renders `examples` in parallel into a freshly cleared `store`, scaled to
/// `size` x `size`. Examples on maps that are not loaded are skipped.
pub fn render_showcase(
    plotter: &Plotter,
    store: &OutputStore,
    examples: &[(&str, &str)],
    size: u32,
) -> Result<Vec<PathBuf>> {
    store.prepare()?;
    let removed = store.clear()?;
    if removed > 0 {
        log::info!("Removed {} old showcase images from {:?}", removed, store.dir());
    }

    let saved: Vec<Option<PathBuf>> = examples
        .par_iter()
        .map(|&(map, message)| match plotter.plot(map, message) {
            Ok(plotted) => {
                let resized = imageops::resize(&plotted, size, size, FilterType::Lanczos3);
                store
                    .save_as(&resized, &format!("{} {}", map, message))
                    .map(Some)
            }
            Err(PlotError::UnknownMap(name)) => {
                log::warn!("Skipping '{} {}': map '{}' is not loaded", map, message, name);
                Ok(None)
            }
            Err(e) => Err(anyhow::anyhow!("Showcase example '{}' failed: {}", message, e)),
        })
        .collect::<Result<_>>()?;

    Ok(saved.into_iter().flatten().collect())
}
