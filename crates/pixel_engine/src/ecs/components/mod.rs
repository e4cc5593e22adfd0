//! ECS Components module
//!
//! The three facets an editor entity can carry.

pub mod transform;
pub mod renderable;
pub mod pickable;

pub use transform::TransformComponent;
pub use renderable::RenderableComponent;
pub use pickable::{PickableComponent, PickingType};
