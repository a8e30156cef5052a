mod compose;
mod discoverable_map;
mod image_store;
mod marker_set;
mod message;
mod narrator;
mod operation;
mod raster;
mod tool;
mod types;

pub use compose::*;
pub use discoverable_map::*;
pub use image_store::*;
pub use marker_set::*;
pub use message::*;
pub use narrator::*;
pub use operation::*;
pub use raster::*;
pub use tool::*;
pub use types::*;

pub extern crate euclid;
pub extern crate serde;
pub extern crate serde_json;
pub extern crate uuid;
