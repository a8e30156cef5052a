use crate::discoverable_map::DiscoverableMap;
use crate::image_store::ImageStore;
use crate::raster::CompositeMode;
use crate::tool::ToolProperties;
use crate::types::{Color, Marker, PaintMode, Point};

/// Which raster an operation targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Layer {
    Veil,
    Ui,
    Markers,
}

/// One atomic raster mutation, produced by a tool and consumed by
/// `apply_operation`. Operations carry no identity and live only long
/// enough to be applied.
///
/// For `Image`, `at` is the top-left corner of the stamped icon — the same
/// convention placed markers use for their coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOperation {
    Clear {
        layer: Layer,
    },
    Circle {
        layer: Layer,
        center: Point,
        diameter: f32,
        stroke_style: Option<Color>,
        fill_style: Option<Color>,
    },
    Line {
        layer: Layer,
        start: Point,
        end: Point,
        width: f32,
        stroke_style: Option<Color>,
    },
    Rect {
        layer: Layer,
        start: Point,
        end: Point,
        line_width: Option<f32>,
        stroke_style: Option<Color>,
        fill_style: Option<Color>,
    },
    Image {
        layer: Layer,
        at: Point,
        src: String,
    },
    /// Drop the marker currently carried by `ToolProperties` (the end of a
    /// move gesture, either direction).
    ClearMarker,
}

/// The compositing behavior for veil painting is the executor's choice,
/// not the tool's: uncovering erases alpha, covering paints it back.
fn composite_for_mode(mode: PaintMode) -> CompositeMode {
    match mode {
        PaintMode::Uncover => CompositeMode::DestinationOut,
        PaintMode::Cover => CompositeMode::SourceOver,
    }
}

pub fn apply_operations(
    operations: &[DrawOperation],
    map: &mut DiscoverableMap,
    props: &mut ToolProperties,
    mode: PaintMode,
    images: &ImageStore,
) {
    for operation in operations {
        apply_operation(operation, map, props, mode, images);
    }
}

/// Apply one operation to the live layers. Shape operations aimed at the
/// marker layer would desynchronize the marker list from its raster, so
/// they are logged and skipped; everything else is matched exhaustively.
pub fn apply_operation(
    operation: &DrawOperation,
    map: &mut DiscoverableMap,
    props: &mut ToolProperties,
    mode: PaintMode,
    images: &ImageStore,
) {
    let veil_composite = composite_for_mode(mode);
    match operation {
        DrawOperation::Clear { layer } => match layer {
            Layer::Veil => map.veil_mut().clear(),
            Layer::Ui => map.ui_mut().clear(),
            Layer::Markers => map.markers_mut().clear(),
        },
        DrawOperation::Circle {
            layer,
            center,
            diameter,
            stroke_style,
            fill_style,
        } => match layer {
            Layer::Veil => {
                if let Some(fill) = fill_style {
                    map.veil_mut()
                        .fill_circle(*center, *diameter, *fill, veil_composite);
                }
                if let Some(stroke) = stroke_style {
                    map.veil_mut()
                        .stroke_circle(*center, *diameter, *stroke, veil_composite);
                }
            }
            Layer::Ui => {
                if let Some(fill) = fill_style {
                    map.ui_mut()
                        .fill_circle(*center, *diameter, *fill, CompositeMode::SourceOver);
                }
                if let Some(stroke) = stroke_style {
                    map.ui_mut()
                        .stroke_circle(*center, *diameter, *stroke, CompositeMode::SourceOver);
                }
            }
            Layer::Markers => log::warn!("circle operation aimed at the marker layer, skipping"),
        },
        DrawOperation::Line {
            layer,
            start,
            end,
            width,
            stroke_style,
        } => {
            let stroke = match stroke_style {
                Some(stroke) => *stroke,
                None => Color::BLACK,
            };
            match layer {
                Layer::Veil => map
                    .veil_mut()
                    .stroke_line(*start, *end, *width, stroke, veil_composite),
                Layer::Ui => {
                    map.ui_mut()
                        .stroke_line(*start, *end, *width, stroke, CompositeMode::SourceOver)
                }
                Layer::Markers => log::warn!("line operation aimed at the marker layer, skipping"),
            }
        }
        DrawOperation::Rect {
            layer,
            start,
            end,
            line_width,
            stroke_style,
            fill_style,
        } => match layer {
            Layer::Veil => {
                if let Some(fill) = fill_style {
                    map.veil_mut().fill_rect(*start, *end, *fill, veil_composite);
                }
                if let Some(stroke) = stroke_style {
                    map.veil_mut().stroke_rect(
                        *start,
                        *end,
                        line_width.unwrap_or(1.0),
                        *stroke,
                        veil_composite,
                    );
                }
            }
            Layer::Ui => {
                if let Some(fill) = fill_style {
                    map.ui_mut()
                        .fill_rect(*start, *end, *fill, CompositeMode::SourceOver);
                }
                if let Some(stroke) = stroke_style {
                    map.ui_mut().stroke_rect(
                        *start,
                        *end,
                        line_width.unwrap_or(1.0),
                        *stroke,
                        CompositeMode::SourceOver,
                    );
                }
            }
            Layer::Markers => log::warn!("rect operation aimed at the marker layer, skipping"),
        },
        DrawOperation::Image { layer, at, src } => match layer {
            Layer::Markers => {
                map.markers_mut().push(
                    Marker {
                        url: src.clone(),
                        x: at.x as i32,
                        y: at.y as i32,
                    },
                    images,
                );
            }
            Layer::Ui => match images.get(src) {
                Some(icon) => {
                    map.ui_mut()
                        .blit(icon, at.x as i32, at.y as i32, CompositeMode::SourceOver)
                }
                None => log::warn!("image {} is not loaded, skipping hint", src),
            },
            Layer::Veil => log::warn!("image operation aimed at the veil layer, skipping"),
        },
        DrawOperation::ClearMarker => {
            props.marker = None;
        }
    }
}
