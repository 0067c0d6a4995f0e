use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, warn};
use rayon::prelude::*;

use crate::diagram::Diagram;

/// Decoded component artwork, keyed by the path it was loaded from.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<PathBuf, RgbaImage>,
    failed: Vec<PathBuf>,
}

impl ImageCache {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode every distinct path in parallel.
    ///
    /// A file that cannot be read or decoded is logged and left out, so the
    /// component using it falls back to an outlined box.
    pub fn preload<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let unique: Vec<PathBuf> = paths.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

        let decoded: Vec<(PathBuf, Option<RgbaImage>)> = unique
            .into_par_iter()
            .map(|path| {
                let image = match image::open(&path) {
                    Ok(img) => Some(img.into_rgba8()),
                    Err(e) => {
                        warn!("Could not load image {}: {}", path.display(), e);
                        None
                    }
                };
                (path, image)
            })
            .collect();

        let mut cache = Self::default();
        for (path, image) in decoded {
            match image {
                Some(img) => {
                    debug!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
                    cache.images.insert(path, img);
                }
                None => cache.failed.push(path),
            }
        }
        cache
    }

    /// Preload the artwork of every component in `diagram`.
    pub fn for_diagram(diagram: &Diagram) -> Self {
        let paths = std::iter::once(&diagram.controller)
            .chain(diagram.components.iter().map(|p| &p.component))
            .filter_map(|c| c.image.clone());
        Self::preload(paths)
    }

    pub fn get(&self, path: &Path) -> Option<&RgbaImage> {
        self.images.get(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Paths that were requested but could not be decoded.
    pub fn failed(&self) -> &[PathBuf] {
        &self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn loads_each_path_once_and_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("led.png");
        RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]))
            .save(&good)
            .unwrap();
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"not a png").unwrap();
        let missing = dir.path().join("missing.png");

        let cache = ImageCache::preload(vec![
            good.clone(),
            broken.clone(),
            good.clone(),
            missing.clone(),
        ]);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&good).map(|i| i.dimensions()), Some((4, 2)));
        assert!(cache.get(&broken).is_none());
        assert_eq!(cache.failed().len(), 2);
        assert!(cache.failed().contains(&missing));
    }

    #[test]
    fn empty_cache() {
        let cache = ImageCache::empty();
        assert!(cache.is_empty());
        assert!(cache.get(Path::new("x.png")).is_none());
    }
}
