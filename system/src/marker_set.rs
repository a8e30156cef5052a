use crate::image_store::ImageStore;
use crate::raster::{CompositeMode, Raster};
use crate::types::Marker;

/// Placed markers for one map, together with the raster layer they are
/// painted on. The list is the source of truth; the raster is repainted
/// from it after every change.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    raster: Raster,
}

/// Everything needed to put a `MarkerSet` back the way it was.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSnapshot {
    markers: Vec<Marker>,
    raster: Raster,
}

impl MarkerSet {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            markers: Vec::new(),
            raster: Raster::new(width, height),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn push(&mut self, marker: Marker, images: &ImageStore) {
        self.markers.push(marker);
        self.update(images);
    }

    /// Hit-test against each marker's bounding box in list order; the
    /// first hit is removed and returned. Box edges are inclusive.
    pub fn remove(&mut self, pointer_x: f32, pointer_y: f32, images: &ImageStore) -> Option<Marker> {
        let hit = self.markers.iter().position(|marker| {
            let icon = match images.get(&marker.url) {
                Some(icon) => icon,
                None => return false,
            };
            let x = marker.x as f32;
            let y = marker.y as f32;
            pointer_x >= x
                && pointer_x <= x + icon.width() as f32
                && pointer_y >= y
                && pointer_y <= y + icon.height() as f32
        })?;
        let removed = self.markers.remove(hit);
        self.update(images);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.raster.clear();
    }

    pub fn snapshot(&self) -> MarkerSnapshot {
        MarkerSnapshot {
            markers: self.markers.clone(),
            raster: self.raster.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &MarkerSnapshot) {
        self.markers = snapshot.markers.clone();
        self.raster = snapshot.raster.clone();
    }

    fn update(&mut self, images: &ImageStore) {
        self.raster.clear();
        for marker in &self.markers {
            match images.get(&marker.url) {
                Some(icon) => {
                    self.raster
                        .blit(icon, marker.x, marker.y, CompositeMode::SourceOver)
                }
                None => log::warn!("marker image {} is not loaded, skipping", marker.url),
            }
        }
    }
}
