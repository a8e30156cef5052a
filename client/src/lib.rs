pub mod assets;
pub mod audience;
pub mod narrator;
pub mod net;
pub mod socket;

pub use assets::{load_image_bytes, load_image_file, AssetError};
pub use audience::{AudienceDisplay, AudienceView, MapView};
pub use narrator::NarratorClient;
pub use net::AwcDialer;
pub use socket::{Connection, DialError, Dialer, EventKind, ReconnectingSocket, SocketEvent};
