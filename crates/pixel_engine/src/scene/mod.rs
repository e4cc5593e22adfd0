//! Editor scene
//!
//! The [`Scene`] store owns every entity together with its physics proxy, and
//! [`persistence`] moves whole scenes to and from JSON snapshot files.

mod error;
pub mod persistence;
mod store;

pub use error::{Result, SceneError};
pub use persistence::{load_scene, save_scene, SceneDocument};
pub use store::{default_picking_type, EntityInfo, Scene};
