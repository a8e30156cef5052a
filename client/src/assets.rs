use std::path::Path;

use thiserror::Error;

use system::{ImageStore, Raster};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decode an encoded image and register it in the store under `url`.
/// Returns the decoded dimensions.
pub fn load_image_bytes(
    store: &mut ImageStore,
    url: &str,
    bytes: &[u8],
) -> Result<(u32, u32), AssetError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    store.insert(url, Raster::from_rgba(width, height, decoded.into_raw()));
    Ok((width, height))
}

pub fn load_image_file(
    store: &mut ImageStore,
    url: &str,
    path: impl AsRef<Path>,
) -> Result<(u32, u32), AssetError> {
    let bytes = std::fs::read(path)?;
    load_image_bytes(store, url, &bytes)
}
