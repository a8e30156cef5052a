use crate::operation::{DrawOperation, Layer};
use crate::types::{Color, Marker, Point};

/// Outline color for transient previews on the hint layer.
pub const HINT_COLOR: Color = Color { r: 0, g: 0, b: 255 };

/// Paint color for the veil. Only its alpha matters once composited, but
/// the opaque black also reads as fog on the narrator's own overlay.
pub const VEIL_COLOR: Color = Color::BLACK;

/// Ambient configuration handed to every tool call. `marker` is set only
/// while a placed marker is being dragged.
#[derive(Debug, Clone)]
pub struct ToolProperties {
    pub pen_size: f32,
    pub marker: Option<Marker>,
}

impl Default for ToolProperties {
    fn default() -> Self {
        Self {
            pen_size: 40.0,
            marker: None,
        }
    }
}

/// A drawing tool: four gesture phases, each turning a pointer coordinate
/// into the operations to apply, in order.
#[derive(Debug, Clone)]
pub enum Tool {
    Pencil(PencilTool),
    Rectangle(RectangleTool),
    PlaceMarker(PlaceMarkerTool),
    MoveMarker(MoveMarkerTool),
}

impl Tool {
    pub fn pencil() -> Self {
        Tool::Pencil(PencilTool::default())
    }

    pub fn rectangle() -> Self {
        Tool::Rectangle(RectangleTool::default())
    }

    pub fn place_marker(icon_url: impl Into<String>, hint_url: impl Into<String>) -> Self {
        Tool::PlaceMarker(PlaceMarkerTool {
            icon_url: icon_url.into(),
            hint_url: hint_url.into(),
        })
    }

    pub fn move_marker() -> Self {
        Tool::MoveMarker(MoveMarkerTool)
    }

    pub fn on_start(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        match self {
            Tool::Pencil(tool) => tool.on_start(at, props),
            Tool::Rectangle(tool) => tool.on_start(at, props),
            Tool::PlaceMarker(tool) => tool.on_start(at, props),
            Tool::MoveMarker(tool) => tool.on_start(at, props),
        }
    }

    pub fn on_move(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        match self {
            Tool::Pencil(tool) => tool.on_move(at, props),
            Tool::Rectangle(tool) => tool.on_move(at, props),
            Tool::PlaceMarker(tool) => tool.on_move(at, props),
            Tool::MoveMarker(tool) => tool.on_move(at, props),
        }
    }

    pub fn on_stop(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        match self {
            Tool::Pencil(tool) => tool.on_stop(at, props),
            Tool::Rectangle(tool) => tool.on_stop(at, props),
            Tool::PlaceMarker(tool) => tool.on_stop(at, props),
            Tool::MoveMarker(tool) => tool.on_stop(at, props),
        }
    }

    pub fn on_cancel(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        match self {
            Tool::Pencil(tool) => tool.on_cancel(at, props),
            Tool::Rectangle(tool) => tool.on_cancel(at, props),
            Tool::PlaceMarker(tool) => tool.on_cancel(at, props),
            Tool::MoveMarker(tool) => tool.on_cancel(at, props),
        }
    }
}

/// Freehand reveal: a filled dot on press, round-capped segments while
/// dragging, a brush-size hint while hovering.
#[derive(Debug, Clone, Default)]
pub struct PencilTool {
    stroke: Option<Point>,
}

impl PencilTool {
    fn on_start(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        self.stroke = Some(at);
        vec![
            DrawOperation::Circle {
                layer: Layer::Veil,
                center: at,
                diameter: props.pen_size,
                stroke_style: None,
                fill_style: Some(VEIL_COLOR),
            },
            DrawOperation::Clear { layer: Layer::Ui },
        ]
    }

    fn on_move(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        if let Some(last) = self.stroke {
            self.stroke = Some(at);
            vec![DrawOperation::Line {
                layer: Layer::Veil,
                start: last,
                end: at,
                width: props.pen_size,
                stroke_style: Some(VEIL_COLOR),
            }]
        } else {
            vec![
                DrawOperation::Clear { layer: Layer::Ui },
                Self::hint(at, props.pen_size),
            ]
        }
    }

    fn on_stop(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        self.stroke = None;
        vec![Self::hint(at, props.pen_size)]
    }

    fn on_cancel(&mut self, _at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        self.stroke = None;
        vec![DrawOperation::Clear { layer: Layer::Ui }]
    }

    fn hint(at: Point, pen_size: f32) -> DrawOperation {
        DrawOperation::Circle {
            layer: Layer::Ui,
            center: at,
            diameter: pen_size,
            stroke_style: Some(HINT_COLOR),
            fill_style: None,
        }
    }
}

/// Rectangular reveal: anchor on press, outline preview while dragging,
/// filled rectangle on release.
#[derive(Debug, Clone, Default)]
pub struct RectangleTool {
    anchor: Option<Point>,
}

impl RectangleTool {
    fn on_start(&mut self, at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        self.anchor = Some(at);
        vec![DrawOperation::Clear { layer: Layer::Ui }]
    }

    fn on_move(&mut self, at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        let mut ops = vec![DrawOperation::Clear { layer: Layer::Ui }];
        if let Some(anchor) = self.anchor {
            ops.push(DrawOperation::Rect {
                layer: Layer::Ui,
                start: anchor,
                end: at,
                line_width: Some(1.0),
                stroke_style: Some(HINT_COLOR),
                fill_style: None,
            });
        }
        ops
    }

    fn on_stop(&mut self, at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        let mut ops = vec![DrawOperation::Clear { layer: Layer::Ui }];
        if let Some(anchor) = self.anchor.take() {
            ops.push(DrawOperation::Rect {
                layer: Layer::Veil,
                start: anchor,
                end: at,
                line_width: Some(1.0),
                stroke_style: Some(VEIL_COLOR),
                fill_style: Some(VEIL_COLOR),
            });
        }
        ops
    }

    fn on_cancel(&mut self, _at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        self.anchor = None;
        vec![DrawOperation::Clear { layer: Layer::Ui }]
    }
}

/// Stamp a marker icon onto the marker layer. One instance exists per
/// in-use pool icon; placement happens immediately on press.
#[derive(Debug, Clone)]
pub struct PlaceMarkerTool {
    pub icon_url: String,
    pub hint_url: String,
}

impl PlaceMarkerTool {
    fn on_start(&mut self, at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        vec![DrawOperation::Image {
            layer: Layer::Markers,
            at,
            src: self.icon_url.clone(),
        }]
    }

    fn on_move(&mut self, at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        vec![
            DrawOperation::Clear { layer: Layer::Ui },
            DrawOperation::Image {
                layer: Layer::Ui,
                at,
                src: self.hint_url.clone(),
            },
        ]
    }

    fn on_stop(&mut self, _at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        Vec::new()
    }

    fn on_cancel(&mut self, _at: Point, _props: &ToolProperties) -> Vec<DrawOperation> {
        vec![DrawOperation::Clear { layer: Layer::Ui }]
    }
}

/// Drag an already-placed marker. The marker itself travels in
/// `ToolProperties::marker` (it was lifted off the list at pointer-down);
/// release stamps it at the new spot, cancel puts it back where it was.
#[derive(Debug, Clone)]
pub struct MoveMarkerTool;

impl MoveMarkerTool {
    fn on_start(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        match &props.marker {
            Some(marker) => vec![DrawOperation::Image {
                layer: Layer::Ui,
                at,
                src: marker.url.clone(),
            }],
            None => Vec::new(),
        }
    }

    fn on_move(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        let mut ops = vec![DrawOperation::Clear { layer: Layer::Ui }];
        if let Some(marker) = &props.marker {
            ops.push(DrawOperation::Image {
                layer: Layer::Ui,
                at,
                src: marker.url.clone(),
            });
        }
        ops
    }

    fn on_stop(&mut self, at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        let mut ops = vec![DrawOperation::Clear { layer: Layer::Ui }];
        if let Some(marker) = &props.marker {
            ops.push(DrawOperation::Image {
                layer: Layer::Markers,
                at,
                src: marker.url.clone(),
            });
            ops.push(DrawOperation::ClearMarker);
        }
        ops
    }

    fn on_cancel(&mut self, _at: Point, props: &ToolProperties) -> Vec<DrawOperation> {
        let mut ops = vec![DrawOperation::Clear { layer: Layer::Ui }];
        if let Some(marker) = &props.marker {
            ops.push(DrawOperation::Image {
                layer: Layer::Markers,
                at: Point::new(marker.x as f32, marker.y as f32),
                src: marker.url.clone(),
            });
            ops.push(DrawOperation::ClearMarker);
        }
        ops
    }
}
