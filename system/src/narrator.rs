use std::collections::HashMap;

use crate::discoverable_map::{DiscoverableMap, MapError};
use crate::image_store::ImageStore;
use crate::message::{AudienceMessage, Frame, Picture};
use crate::operation::{apply_operations, DrawOperation};
use crate::tool::{Tool, ToolProperties};
use crate::types::{FileKind, MarkerIcon, PaintMode, Point, SceneFile};

/// Icon used when a story configures no markers of its own.
pub const DEFAULT_MARKER_URL: &str = "/img/marker.png";

/// The narrator's editing surface: loaded maps keyed by URL, the active
/// tool, paint mode and pen size, and the gesture plumbing that turns
/// pointer events into layer mutations. Everything here is synchronous;
/// shipping the result to an actual socket is the client's job.
pub struct MapDiscoverer {
    images: ImageStore,
    loaded_maps: HashMap<String, DiscoverableMap>,
    current_map_url: Option<String>,
    paint_mode: PaintMode,
    tools: Vec<Tool>,
    current_tool: usize,
    transient_tool: Option<Tool>,
    props: ToolProperties,
}

impl MapDiscoverer {
    pub fn new(images: ImageStore) -> Self {
        Self {
            images,
            loaded_maps: HashMap::new(),
            current_map_url: None,
            paint_mode: PaintMode::Uncover,
            tools: vec![Tool::pencil(), Tool::rectangle()],
            current_tool: 0,
            transient_tool: None,
            props: ToolProperties::default(),
        }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    /// Make a map current, loading it on first reference. Loading a URL
    /// twice is a cache hit. Returns the map's dimensions.
    pub fn load_map(&mut self, url: &str) -> Result<(u32, u32), MapError> {
        let map = self
            .loaded_maps
            .entry(url.to_owned())
            .or_insert_with(|| DiscoverableMap::new(url));
        let mut dimensions = (0, 0);
        map.init(&self.images, |width, height| {
            dimensions = (width, height);
        })?;
        self.current_map_url = Some(url.to_owned());
        Ok(dimensions)
    }

    pub fn current_map(&self) -> Option<&DiscoverableMap> {
        let url = self.current_map_url.as_ref()?;
        self.loaded_maps.get(url)
    }

    fn current_map_mut(&mut self) -> Option<&mut DiscoverableMap> {
        let url = self.current_map_url.as_ref()?;
        self.loaded_maps.get_mut(url)
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn select_tool(&mut self, index: usize) -> bool {
        if index < self.tools.len() {
            self.current_tool = index;
            true
        } else {
            false
        }
    }

    pub fn pen_size(&self) -> f32 {
        self.props.pen_size
    }

    pub fn set_pen_size(&mut self, pen_size: f32) {
        self.props.pen_size = pen_size;
    }

    pub fn paint_mode(&self) -> PaintMode {
        self.paint_mode
    }

    /// Flip between uncovering and re-covering.
    pub fn toggle_cover(&mut self) {
        self.paint_mode = match self.paint_mode {
            PaintMode::Uncover => PaintMode::Cover,
            PaintMode::Cover => PaintMode::Uncover,
        };
    }

    /// Rebuild the marker tool palette from the story's in-use icons. With
    /// no icons configured a single generic marker tool is kept.
    pub fn configure_marker_tools(&mut self, icons: &[MarkerIcon]) {
        self.tools
            .retain(|tool| !matches!(tool, Tool::PlaceMarker(_)));
        if icons.is_empty() {
            let hint = self.images.ensure_hint(DEFAULT_MARKER_URL);
            self.tools.push(Tool::place_marker(DEFAULT_MARKER_URL, hint));
        } else {
            for icon in icons {
                let hint = self.images.ensure_hint(&icon.url);
                self.tools.push(Tool::place_marker(&icon.url, hint));
            }
        }
    }

    pub fn undo(&mut self) {
        if let Some(map) = self.current_map_mut() {
            map.undo();
        }
    }

    pub fn redo(&mut self) {
        if let Some(map) = self.current_map_mut() {
            map.redo();
        }
    }

    /// Pointer pressed. A press on a placed marker lifts it off the map
    /// and switches to the move-marker tool for the rest of the gesture.
    pub fn pointer_down(&mut self, at: Point) {
        if self.current_map_url.is_none() {
            return;
        }

        if self.transient_tool.is_none() {
            if let Some(url) = self.current_map_url.clone() {
                if let Some(map) = self.loaded_maps.get_mut(&url) {
                    if let Some(marker) = map.markers_mut().remove(at.x, at.y, &self.images) {
                        self.props.marker = Some(marker);
                        self.transient_tool = Some(Tool::move_marker());
                    }
                }
            }
        }

        let props = self.props.clone();
        let ops = self.active_tool_mut().on_start(at, &props);
        self.apply(&ops);
    }

    pub fn pointer_move(&mut self, at: Point) {
        if self.current_map_url.is_none() {
            return;
        }
        let props = self.props.clone();
        let ops = self.active_tool_mut().on_move(at, &props);
        self.apply(&ops);
    }

    /// Pointer released: finish the gesture and checkpoint the result.
    pub fn pointer_up(&mut self, at: Point) {
        if self.current_map_url.is_none() {
            return;
        }
        let props = self.props.clone();
        let ops = self.active_tool_mut().on_stop(at, &props);
        self.apply(&ops);
        self.transient_tool = None;
        if let Some(map) = self.current_map_mut() {
            map.save_checkpoint();
        }
    }

    /// Pointer left the canvas mid-gesture: let the tool clean up its
    /// transient state. No checkpoint — nothing persistent changed, and a
    /// cancelled marker move puts the marker back itself.
    pub fn pointer_out(&mut self, at: Point) {
        if self.current_map_url.is_none() {
            return;
        }
        let props = self.props.clone();
        let ops = self.active_tool_mut().on_cancel(at, &props);
        self.apply(&ops);
        self.transient_tool = None;
    }

    fn active_tool_mut(&mut self) -> &mut Tool {
        match self.transient_tool.as_mut() {
            Some(tool) => tool,
            None => &mut self.tools[self.current_tool],
        }
    }

    fn apply(&mut self, ops: &[DrawOperation]) {
        let url = match self.current_map_url.as_ref() {
            Some(url) => url,
            None => return,
        };
        let map = match self.loaded_maps.get_mut(url) {
            Some(map) => map,
            None => return,
        };
        apply_operations(ops, map, &mut self.props, self.paint_mode, &self.images);
    }

    /// The metadata/payload frame pair for the currently revealed area, or
    /// `None` when nothing is revealed (no network action, not an error).
    pub fn send_to_audience(&self) -> Option<Vec<Frame>> {
        let area = self.current_map()?.calculate_discovered_map_area()?;
        let metadata = AudienceMessage::MapMetadata {
            width: area.bounds.width(),
            height: area.bounds.height(),
        };
        let json = serde_json::to_string(&metadata).expect("metadata must serialize");
        Some(vec![
            Frame::Text(json),
            Frame::Binary(area.image.into_data()),
        ])
    }

    /// Gallery message for the image-type files of a scene listing.
    pub fn pictures_frame(files: &[SceneFile]) -> Frame {
        let pictures = files
            .iter()
            .filter(|file| file.kind == FileKind::Image)
            .map(|file| Picture {
                original_url: file.url.clone(),
                thumbnail_url: file.thumbnail_url.clone(),
            })
            .collect::<Vec<_>>();
        let message = AudienceMessage::Pictures { pictures };
        Frame::Text(serde_json::to_string(&message).expect("pictures must serialize"))
    }
}
