use system::{MapDiscoverer, SceneFile};

use crate::socket::ReconnectingSocket;

/// The narrator's side of the wire: the editing surface plus the socket
/// that carries its output. Editing keeps working while offline; only the
/// sends are lost, silently, as the transport promises.
pub struct NarratorClient {
    pub stage: MapDiscoverer,
    socket: ReconnectingSocket,
}

impl NarratorClient {
    pub fn new(stage: MapDiscoverer, socket: ReconnectingSocket) -> Self {
        Self { stage, socket }
    }

    pub fn socket(&self) -> &ReconnectingSocket {
        &self.socket
    }

    pub fn is_online(&self) -> bool {
        self.socket.is_online()
    }

    /// Compose the revealed area and hand the metadata/payload pair to the
    /// socket. `false` means nothing was revealed, so nothing was sent.
    pub fn send_to_audience(&self) -> bool {
        match self.stage.send_to_audience() {
            Some(frames) => {
                for frame in frames {
                    self.socket.send(frame);
                }
                true
            }
            None => false,
        }
    }

    /// Switch the audience over to the gallery for a scene's images.
    pub fn show_pictures(&self, files: &[SceneFile]) {
        self.socket.send(MapDiscoverer::pictures_frame(files));
    }
}
