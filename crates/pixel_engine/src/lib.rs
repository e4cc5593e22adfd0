//! # Pixel Engine
//!
//! Core of a small 3D scene editor: a fly camera, an entity store with
//! transform/renderable/pickable facets, mouse picking against oriented boxes,
//! spheres or physics proxies, and JSON scene snapshots.
//!
//! ## Features
//!
//! - **Picking**: screen-to-world rays tested first-hit in creation order
//! - **ECS Architecture**: slotmap-keyed component storage
//! - **Physics Proxies**: rapier bodies kept in sync with entity transforms
//! - **Scene Files**: JSON load/save with camera pose
//! - **Backend Neutral**: frames are plain data handed to a render backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixel_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut editor = EditorContext::open(EditorConfig::default());
//!     let mut backend = HeadlessBackend::new();
//!
//!     editor.apply(EditorCommand::Create(ModelId::Cube))?;
//!     editor.update(1.0 / 60.0)?;
//!     backend.render_frame(&editor.build_frame())?;
//!
//!     editor.shutdown()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod render;
pub mod input;
pub mod physics;
pub mod picking;
pub mod scene;
pub mod editor;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EditorConfig},
        ecs::{
            components::{PickableComponent, PickingType, RenderableComponent, TransformComponent},
            Entity, World,
        },
        editor::{DisplayFlags, EditorCommand, EditorContext},
        foundation::{
            math::{Mat4, Vec3},
            time::{FrameStats, Timer},
        },
        input::{KeyCode, MouseButton},
        picking::{PickMode, PickOutcome, PickingCoordinator, Ray, RayGenerator, Selection},
        render::{Camera, CameraSettings, HeadlessBackend, ModelId, RenderBackend, RenderFrameData},
        scene::{Scene, SceneError},
    };
}
