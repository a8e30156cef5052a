use std::collections::HashMap;

use crate::compose::map_pixels;
use crate::raster::Raster;

/// URL-keyed cache of decoded images. The core never fetches or decodes
/// anything itself; clients put rasters in, tools and layers look them up.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<String, Raster>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
        }
    }

    pub fn insert(&mut self, url: impl Into<String>, raster: Raster) {
        self.images.insert(url.into(), raster);
    }

    pub fn get(&self, url: &str) -> Option<&Raster> {
        self.images.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.images.contains_key(url)
    }

    pub fn hint_key(url: &str) -> String {
        format!("{}#hint", url)
    }

    /// Make sure a tinted preview variant of `url` exists and return its
    /// key. When the source image is missing the original URL comes back
    /// unchanged, so previews degrade to the plain icon.
    pub fn ensure_hint(&mut self, url: &str) -> String {
        let key = Self::hint_key(url);
        if self.images.contains_key(&key) {
            return key;
        }
        match self.images.get(url) {
            Some(src) => {
                let tinted = map_pixels(src, |r, g, b, a| {
                    let sum = r as u16 + g as u16 + b as u16;
                    if sum > 0 {
                        [0, 0, (sum / 3) as u8, a]
                    } else {
                        [0, 0, 0, a]
                    }
                });
                self.images.insert(key.clone(), tinted);
                key
            }
            None => {
                log::warn!("no image for {}, previews will use the plain icon", url);
                url.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn hint_is_derived_once_and_cached() {
        let mut store = ImageStore::new();
        store.insert("/img/skull.png", Raster::filled(2, 2, Color { r: 90, g: 0, b: 0 }));
        let key = store.ensure_hint("/img/skull.png");
        assert_eq!(key, "/img/skull.png#hint");
        assert_eq!(store.get(&key).unwrap().pixel(0, 0), [0, 0, 30, 255]);
        assert_eq!(store.ensure_hint("/img/skull.png"), key);
    }

    #[test]
    fn missing_source_falls_back_to_original_url() {
        let mut store = ImageStore::new();
        assert_eq!(store.ensure_hint("/img/ghost.png"), "/img/ghost.png");
        assert!(!store.contains("/img/ghost.png#hint"));
    }
}
