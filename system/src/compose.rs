use crate::raster::{Bounds, Raster};

/// Smallest rectangle containing every pixel the picker selects, or `None`
/// when no pixel qualifies.
pub fn minimum_rectangle<F>(raster: &Raster, pixel_picker: F) -> Option<Bounds>
where
    F: Fn(u8, u8, u8, u8) -> bool,
{
    let width = raster.width();
    let height = raster.height();
    let data = raster.data();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for y in 0..height {
        for x in 0..width {
            let i = ((y * width + x) * 4) as usize;
            if pixel_picker(data[i], data[i + 1], data[i + 2], data[i + 3]) {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                found = true;
            }
        }
    }

    if found {
        Some(Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    } else {
        None
    }
}

/// The audience-visible cutout: bounding rectangle of the revealed veil
/// area plus the composited pixels for exactly that rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredArea {
    pub bounds: Bounds,
    pub image: Raster,
}

/// Composite the revealed part of a map for the audience.
///
/// The bounding rectangle is a superset of the (possibly irregular)
/// revealed shape, so pixels inside it that the veil still covers get
/// their RGB zeroed, alpha untouched. Markers sit above the fog: a pixel
/// the marker layer claims keeps the marker's color even where the veil is
/// intact.
pub fn discovered_map_area(
    map_image: &Raster,
    veil: &Raster,
    markers: &Raster,
) -> Option<DiscoveredArea> {
    let bounds = minimum_rectangle(veil, |_, _, _, a| a == 0)?;

    let mut image = map_image.crop(&bounds);
    let marker_patch = markers.crop(&bounds);
    let veil_patch = veil.crop(&bounds);

    let out = image.data_mut();
    let marker_data = marker_patch.data();
    let veil_data = veil_patch.data();
    for i in (0..out.len()).step_by(4) {
        if marker_data[i + 3] != 0 {
            out[i..i + 4].copy_from_slice(&marker_data[i..i + 4]);
        } else if veil_data[i + 3] != 0 {
            out[i] = 0;
            out[i + 1] = 0;
            out[i + 2] = 0;
        }
    }

    Some(DiscoveredArea { bounds, image })
}

/// Per-pixel recoloring, used to derive hint variants of marker icons.
pub fn map_pixels<F>(src: &Raster, mapper: F) -> Raster
where
    F: Fn(u8, u8, u8, u8) -> [u8; 4],
{
    let mut out = src.clone();
    for pixel in out.data_mut().chunks_exact_mut(4) {
        let mapped = mapper(pixel[0], pixel[1], pixel[2], pixel[3]);
        pixel.copy_from_slice(&mapped);
    }
    out
}
