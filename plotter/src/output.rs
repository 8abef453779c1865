use anyhow::{Context, Result, anyhow};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Directory that rendered maps are written to.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
    extension: String,
    format: ImageFormat,
}

impl OutputStore {
    pub fn new(dir: impl Into<PathBuf>, extension: &str) -> Result<Self> {
        let format = ImageFormat::from_extension(extension)
            .ok_or_else(|| anyhow!("Unsupported output image extension '{}'", extension))?;
        Ok(Self {
            dir: dir.into(),
            extension: extension.to_string(),
            format,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prepare(&self) -> Result<()> {
        if !self.dir.exists() {
            log::info!("Creating output directory: {:?}", self.dir);
        }
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.dir))
    }

    /// Removes every file below the output directory. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }
        clear_dir(&self.dir)
    }

    /// Saves under a fresh millisecond timestamp name.
    pub fn save(&self, image: &RgbaImage) -> Result<PathBuf> {
        let path = self.unique_path();
        self.write(image, &path)?;
        Ok(path)
    }

    pub fn save_as(&self, image: &RgbaImage, stem: &str) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}.{}", stem, self.extension));
        self.write(image, &path)?;
        Ok(path)
    }

    /// Deletes a saved image. Returns `false` when it was already gone.
    pub fn remove(&self, path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Error removing {:?}: {}", path, e);
            return Err(e).with_context(|| format!("Failed to remove {:?}", path));
        }
        log::debug!("Removed {:?}", path);
        Ok(true)
    }

    fn unique_path(&self) -> PathBuf {
        let mut stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        loop {
            let path = self.dir.join(format!("{}.{}", stamp, self.extension));
            if !path.exists() {
                return path;
            }
            stamp = stamp.saturating_sub(1);
        }
    }

    fn write(&self, image: &RgbaImage, path: &Path) -> Result<()> {
        let result = match self.format {
            ImageFormat::Png | ImageFormat::Tiff => image.save_with_format(path, self.format),
            // No alpha channel in the remaining formats.
            _ => DynamicImage::ImageRgba8(image.clone())
                .to_rgb8()
                .save_with_format(path, self.format),
        };
        result.with_context(|| format!("Unable to save image at {:?}", path))?;
        log::debug!("Saved {:?}", path);
        Ok(())
    }
}

fn clear_dir(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            removed += clear_dir(&path)?;
        } else if let Err(e) = fs::remove_file(&path) {
            log::warn!("Error removing {:?} during output cleanup: {}", path, e);
        } else {
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 255]))
    }

    #[test]
    fn test_rejects_unknown_extension() {
        assert!(OutputStore::new("out", "nope").is_err());
    }

    #[test]
    fn test_save_gives_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = OutputStore::new(dir.path(), "png").unwrap();

        let first = store.save(&sample()).unwrap();
        let second = store.save(&sample()).unwrap();

        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
        assert_eq!(image::open(&first).unwrap().to_rgba8(), sample());
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let store = OutputStore::new(dir.path(), "jpeg").unwrap();
        let path = store.save_as(&sample(), "erangel 90 ak1").unwrap();

        assert_eq!(path.file_name().unwrap(), "erangel 90 ak1.jpeg");
        assert_eq!(image::open(&path).unwrap().width(), 4);
    }

    #[test]
    fn test_remove_saved_image() {
        let dir = tempfile::tempdir().unwrap();
        let store = OutputStore::new(dir.path(), "png").unwrap();
        let path = store.save(&sample()).unwrap();

        assert!(store.remove(&path).unwrap());
        assert!(!path.exists());
        assert!(!store.remove(&path).unwrap());
    }

    #[test]
    fn test_prepare_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = OutputStore::new(dir.path().join("temp"), "png").unwrap();
        assert_eq!(store.clear().unwrap(), 0);

        store.prepare().unwrap();
        store.save(&sample()).unwrap();
        store.save_as(&sample(), "kept").unwrap();

        assert_eq!(store.clear().unwrap(), 2);
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 0);
    }
}
