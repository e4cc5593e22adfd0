//! Entity-Component-System implementation
//!
//! A small ECS: entities are generational slot keys, each component type has
//! its own storage, and queries iterate in entity creation order.

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;
pub mod components;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
