//! Mouse picking
//!
//! Screen-space clicks become world-space rays ([`RayGenerator`]), rays are
//! tested against entities ([`intersect`]) and the [`PickingCoordinator`]
//! turns the first hit into a [`Selection`].

pub mod coordinator;
pub mod intersect;
pub mod ray;

pub use coordinator::{PickMode, PickOutcome, PickingCoordinator, Selection};
pub use intersect::{ray_obb, ray_obb_distance, ray_proxy, ray_sphere};
pub use ray::{Ray, RayGenerator};
