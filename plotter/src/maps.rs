use anyhow::{Context, Result};
use image::RgbaImage;
use planepal_common::error::PlotError;
use planepal_common::util::config::MapsConfig;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Read-only set of named base maps. Renders always work on copies.
#[derive(Debug, Default)]
pub struct MapStore {
    maps: HashMap<String, Arc<RgbaImage>>,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every configured map. Maps that fail to load are logged and left out.
    pub fn load(config: &MapsConfig) -> Self {
        let mut store = Self::new();
        let resources = Path::new(&config.resources_dir);

        for (name, file) in &config.files {
            let path = resources.join(file);
            match load_map(&path) {
                Ok(canvas) => {
                    log::info!(
                        "Loaded map '{}' from {:?} ({}x{})",
                        name,
                        path,
                        canvas.width(),
                        canvas.height()
                    );
                    store.insert(name, canvas);
                }
                Err(e) => log::error!("Error opening base map '{}': {:#}", name, e),
            }
        }
        store
    }

    pub fn insert(&mut self, name: &str, canvas: RgbaImage) {
        self.maps.insert(name.to_lowercase(), Arc::new(canvas));
    }

    pub fn canvas(&self, name: &str) -> Result<Arc<RgbaImage>, PlotError> {
        self.maps
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| PlotError::UnknownMap(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.maps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

pub fn load_map(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).with_context(|| format!("Failed to read map {:?}", path))?;
    Ok(image.to_rgba8())
}
