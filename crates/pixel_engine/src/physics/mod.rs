//! Physics module: pick-only proxy bodies
//!
//! Every pickable entity owns one fixed rigid body in a rapier world. The
//! world is never stepped; it exists so mouse rays can be tested against the
//! same shapes the physics debug overlay draws.

pub mod error;
pub mod proxy_world;
pub mod debug_draw;

pub use error::{PhysicsError, Result};
pub use proxy_world::{ProxyHandle, ProxyWorld, ProxyHit};
