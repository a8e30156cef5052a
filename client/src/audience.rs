use system::{AudienceMessage, Frame, Picture};

/// Pixels for the map the narrator last announced. The buffer is black
/// until the matching payload arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl MapView {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudienceDisplay {
    Pictures(Vec<Picture>),
    Map(MapView),
}

/// What an audience screen shows, driven purely by the inbound stream:
/// `map-metadata` switches to map mode and sizes the buffer, the binary
/// payload that follows fills it, `pictures` switches to the gallery.
/// Anything malformed is logged and dropped; the stream carries no
/// recovery protocol.
pub struct AudienceView {
    display: AudienceDisplay,
}

impl AudienceView {
    pub fn new() -> Self {
        Self {
            display: AudienceDisplay::Pictures(Vec::new()),
        }
    }

    pub fn display(&self) -> &AudienceDisplay {
        &self.display
    }

    pub fn handle_frame(&mut self, frame: &Frame) {
        match frame {
            Frame::Text(text) => self.handle_text(text),
            Frame::Binary(bytes) => self.handle_binary(bytes),
        }
    }

    pub fn handle_text(&mut self, text: &str) {
        match serde_json::from_str::<AudienceMessage>(text) {
            Ok(AudienceMessage::MapMetadata { width, height }) => {
                self.display = AudienceDisplay::Map(MapView {
                    width,
                    height,
                    pixels: vec![0; (width * height * 4) as usize],
                });
            }
            Ok(AudienceMessage::Pictures { pictures }) => {
                self.display = AudienceDisplay::Pictures(pictures);
            }
            Err(err) => {
                log::warn!("unintelligible narrator message ({}): {}", err, text);
            }
        }
    }

    pub fn handle_binary(&mut self, bytes: &[u8]) {
        match &mut self.display {
            AudienceDisplay::Map(view) => {
                if bytes.len() == view.pixels.len() {
                    view.pixels.copy_from_slice(bytes);
                } else {
                    log::warn!(
                        "payload of {} bytes does not fit the announced {}x{} map",
                        bytes.len(),
                        view.width,
                        view.height
                    );
                }
            }
            AudienceDisplay::Pictures(_) => {
                log::warn!("binary payload outside map mode, dropping");
            }
        }
    }
}

impl Default for AudienceView {
    fn default() -> Self {
        Self::new()
    }
}
