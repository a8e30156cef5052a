use serde::{Deserialize, Serialize};

use crate::types::{Role, SessionId};

/// Narrator-to-audience message families. The JSON spellings are part of
/// the wire protocol; `MapMetadata` announces a binary payload of exactly
/// `width * height * 4` RGBA bytes on the same stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AudienceMessage {
    MapMetadata { width: u32, height: u32 },
    Pictures { pictures: Vec<Picture> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub original_url: String,
    pub thumbnail_url: String,
}

/// One unit of the ordered mixed text/binary stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

/// Subscribe path for a role within a session.
pub fn ws_path(role: Role, session_id: SessionId) -> String {
    match role {
        Role::Narrator => format!("/narrator/ws/{}", session_id),
        Role::Audience => format!("/audience/ws/{}", session_id),
    }
}
