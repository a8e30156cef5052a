use serde::{Deserialize, Serialize};

pub type ConnectionId = u16;
pub type SessionId = u32;

/// Pointer coordinate in map pixel space.
pub type Point = euclid::default::Point2D<f32>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
}

impl std::default::Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Role {
    Narrator,
    Audience,
}

/// Painting direction for veil-layer operations. `Uncover` erases veil
/// alpha (reveals), `Cover` paints it back.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PaintMode {
    Uncover,
    Cover,
}

/// A marker placed on a map. `x`/`y` is the top-left corner of the stamped
/// icon, not its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub url: String,
    pub x: i32,
    pub y: i32,
}

/// A reusable iconset entry from the story's marker pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub id: uuid::Uuid,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Map,
}

/// A story/scene file record as listed by the story store. Read to populate
/// the narrator's file picker; never stored or fetched by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFile {
    pub id: uuid::Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub url: String,
    pub thumbnail_url: String,
}
