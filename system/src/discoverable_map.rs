use thiserror::Error;

use crate::compose::{discovered_map_area, DiscoveredArea};
use crate::image_store::ImageStore;
use crate::marker_set::{MarkerSet, MarkerSnapshot};
use crate::raster::Raster;
use crate::types::Color;

/// Snapshots retained for undo. Oldest entries are dropped beyond this, so
/// a marathon session cannot grow without bound.
pub const MAX_CHECKPOINTS: usize = 64;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map image {0} is not in the image store")]
    MissingImage(String),
}

#[derive(Debug, Clone)]
struct Checkpoint {
    veil: Raster,
    markers: MarkerSnapshot,
}

/// One loaded map: the image, the fog-of-war veil over it, the marker
/// layer, a transient UI-hint layer, and the checkpoint stack for
/// undo/redo. All layers share the image's dimensions, fixed at load.
#[derive(Debug)]
pub struct DiscoverableMap {
    url: String,
    image: Raster,
    veil: Raster,
    ui: Raster,
    markers: MarkerSet,
    checkpoints: Vec<Checkpoint>,
    checkpoint_index: usize,
    loaded: bool,
}

impl DiscoverableMap {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            image: Raster::new(0, 0),
            veil: Raster::new(0, 0),
            ui: Raster::new(0, 0),
            markers: MarkerSet::new(0, 0),
            checkpoints: Vec::new(),
            checkpoint_index: 0,
            loaded: false,
        }
    }

    /// Resolve the map image and allocate every layer at its size: the
    /// veil starts fully opaque (everything hidden), markers and hints
    /// empty, and the checkpoint stack holds the single initial snapshot.
    /// A map that already finished loading reports its dimensions again
    /// and does nothing else.
    pub fn init<F>(&mut self, images: &ImageStore, on_load: F) -> Result<(), MapError>
    where
        F: FnOnce(u32, u32),
    {
        if self.loaded {
            on_load(self.image.width(), self.image.height());
            return Ok(());
        }

        let image = images
            .get(&self.url)
            .ok_or_else(|| MapError::MissingImage(self.url.clone()))?
            .clone();
        let width = image.width();
        let height = image.height();

        self.veil = Raster::filled(width, height, Color::BLACK);
        self.ui = Raster::new(width, height);
        self.markers = MarkerSet::new(width, height);
        self.image = image;
        self.reset_checkpoints();
        self.loaded = true;

        on_load(width, height);
        Ok(())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn veil(&self) -> &Raster {
        &self.veil
    }

    pub fn veil_mut(&mut self) -> &mut Raster {
        &mut self.veil
    }

    pub fn ui(&self) -> &Raster {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut Raster {
        &mut self.ui
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut MarkerSet {
        &mut self.markers
    }

    fn reset_checkpoints(&mut self) {
        self.checkpoints = vec![Checkpoint {
            veil: self.veil.clone(),
            markers: self.markers.snapshot(),
        }];
        self.checkpoint_index = 0;
    }

    /// Capture the persistent layers. Checkpoints past the cursor are
    /// discarded first, so an edit after undo makes redo unavailable.
    pub fn save_checkpoint(&mut self) {
        self.checkpoints.truncate(self.checkpoint_index + 1);
        self.checkpoints.push(Checkpoint {
            veil: self.veil.clone(),
            markers: self.markers.snapshot(),
        });
        if self.checkpoints.len() > MAX_CHECKPOINTS {
            self.checkpoints.remove(0);
        }
        self.checkpoint_index = self.checkpoints.len() - 1;
    }

    pub fn undo(&mut self) {
        if self.checkpoint_index > 0 {
            self.checkpoint_index -= 1;
            self.restore_checkpoint();
        }
    }

    pub fn redo(&mut self) {
        if self.checkpoint_index + 1 < self.checkpoints.len() {
            self.checkpoint_index += 1;
            self.restore_checkpoint();
        }
    }

    fn restore_checkpoint(&mut self) {
        let checkpoint = &self.checkpoints[self.checkpoint_index];
        self.veil = checkpoint.veil.clone();
        self.markers.restore(&checkpoint.markers);
    }

    /// The composited cutout for the audience, or `None` while nothing is
    /// revealed.
    pub fn calculate_discovered_map_area(&self) -> Option<DiscoveredArea> {
        discovered_map_area(&self.image, &self.veil, self.markers.raster())
    }
}
