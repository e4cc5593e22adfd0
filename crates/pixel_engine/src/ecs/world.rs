//! ECS World implementation

use super::storage::{ComponentMap, ErasedStorage};
use super::{Component, Entity};
use slotmap::SlotMap;
use std::any::TypeId;
use std::collections::HashMap;

/// ECS World containing all entities and components
///
/// Liveness lives in a slot map; a separate list keeps creation order, and
/// every query helper iterates in that order, which is what the picking
/// first-hit policy and scene saving rely on.
pub struct World {
    entities: SlotMap<Entity, ()>,
    order: Vec<Entity>,
    component_storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
            component_storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.insert(());
        self.order.push(entity);
        log::trace!("Created {}", entity);
        entity
    }

    /// Destroy an entity and every component attached to it
    ///
    /// Returns `false` when the entity was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        self.order.retain(|e| *e != entity);
        for storage in self.component_storages.values_mut() {
            storage.remove_entity(entity);
        }
        log::trace!("Destroyed {}", entity);
        true
    }

    /// Whether the entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    fn storage<T: Component>(&self) -> Option<&ComponentMap<T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<ComponentMap<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentMap<T>> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<ComponentMap<T>>())
    }

    /// Add a component to an entity, replacing any previous one of the same type
    ///
    /// Components added to dead entities are dropped.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        if !self.contains(entity) {
            log::warn!("Ignoring component for dead {}", entity);
            return;
        }
        self.component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentMap::<T>::new()));
        if let Some(storage) = self.storage_mut::<T>() {
            storage.insert(entity, component);
        }
    }

    /// Detach a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Whether the entity carries a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|storage| storage.contains_key(entity))
    }

    /// Entities carrying a `T`, in creation order
    pub fn query<T: Component>(&self) -> Vec<Entity> {
        let Some(storage) = self.storage::<T>() else {
            return Vec::new();
        };
        self.order
            .iter()
            .copied()
            .filter(|entity| storage.contains_key(*entity))
            .collect()
    }

    /// Entities carrying both an `A` and a `B`, in creation order
    pub fn query2<A: Component, B: Component>(&self) -> Vec<Entity> {
        let (Some(a), Some(b)) = (self.storage::<A>(), self.storage::<B>()) else {
            return Vec::new();
        };
        self.order
            .iter()
            .copied()
            .filter(|entity| a.contains_key(*entity) && b.contains_key(*entity))
            .collect()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Destroy every entity and component
    pub fn clear(&mut self) {
        self.entities.clear();
        self.order.clear();
        self.component_storages.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Name(&'static str);
    impl Component for Name {}

    #[derive(Debug, PartialEq)]
    struct Marker;
    impl Component for Marker {}

    #[test]
    fn test_components_attach_and_detach_independently() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Name("Cube0"));
        world.add_component(e, Marker);

        assert!(world.has_component::<Marker>(e));
        assert_eq!(world.remove_component::<Marker>(e), Some(Marker));
        assert!(!world.has_component::<Marker>(e));
        assert_eq!(world.get_component::<Name>(e), Some(&Name("Cube0")));
    }

    #[test]
    fn test_query_follows_creation_order() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        let c = world.create_entity();
        // Attach out of creation order.
        world.add_component(c, Name("c"));
        world.add_component(a, Name("a"));
        world.add_component(b, Marker);
        world.add_component(c, Marker);

        assert_eq!(world.query::<Name>(), vec![a, c]);
        assert_eq!(world.query2::<Name, Marker>(), vec![c]);
    }

    #[test]
    fn test_destroy_removes_components() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, Name("a"));
        world.add_component(b, Name("b"));

        assert!(world.destroy_entity(a));
        assert!(!world.destroy_entity(a));
        assert_eq!(world.get_component::<Name>(a), None);
        assert_eq!(world.query::<Name>(), vec![b]);

        world.add_component(a, Marker);
        assert!(!world.has_component::<Marker>(a));
    }

    #[test]
    fn test_create_destroy_cycles_reuse_slots() {
        let mut world = World::new();
        let keep = world.create_entity();
        world.add_component(keep, Name("keep"));

        let mut last = None;
        for _ in 0..10_000 {
            let e = world.create_entity();
            world.add_component(e, Name("temp"));
            assert!(world.destroy_entity(e));
            last = Some(e);
        }

        assert_eq!(world.entity_count(), 1);
        assert!(world.entities.capacity() < 16);
        let storage = world.storage::<Name>().expect("name storage");
        assert_eq!(storage.len(), 1);
        assert!(storage.capacity() < 16);

        let stale = last.expect("loop ran");
        assert!(!world.contains(stale));
        assert_eq!(world.get_component::<Name>(stale), None);
        assert_eq!(world.query::<Name>(), vec![keep]);
    }

    #[test]
    fn test_get_component_mut() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Name("old"));
        if let Some(name) = world.get_component_mut::<Name>(e) {
            name.0 = "new";
        }
        assert_eq!(world.get_component::<Name>(e), Some(&Name("new")));
    }
}
