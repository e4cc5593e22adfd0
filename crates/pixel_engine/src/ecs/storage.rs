//! Component storage
//!
//! Each component type lives in its own [`ComponentMap`], a slotmap secondary
//! map keyed by [`Entity`]. Lookups check the key version, so a handle to a
//! destroyed entity never reaches the component of the slot's next owner.

use super::{Component, Entity};
use slotmap::SecondaryMap;
use std::any::Any;

/// Storage for one component type
pub type ComponentMap<T> = SecondaryMap<Entity, T>;

/// Type-erased view of a [`ComponentMap`] so the world can hold every storage in one map
pub(crate) trait ErasedStorage {
    /// Drop whatever component `entity` has in this storage
    fn remove_entity(&mut self, entity: Entity);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for ComponentMap<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[derive(Debug, PartialEq)]
    struct Tag(u32);
    impl Component for Tag {}

    #[test]
    fn test_erased_remove_drops_component() {
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let mut storage: Box<dyn ErasedStorage> = Box::new(ComponentMap::<Tag>::new());
        let map = storage.as_any_mut().downcast_mut::<ComponentMap<Tag>>().expect("tag storage");
        map.insert(a, Tag(1));
        map.insert(b, Tag(2));

        storage.remove_entity(a);
        let map = storage.as_any().downcast_ref::<ComponentMap<Tag>>().expect("tag storage");
        assert!(!map.contains_key(a));
        assert_eq!(map.get(b), Some(&Tag(2)));
    }

    #[test]
    fn test_stale_handle_misses_reused_slot() {
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        let mut map = ComponentMap::new();

        let old = keys.insert(());
        map.insert(old, Tag(1));
        keys.remove(old);
        map.remove(old);

        let new = keys.insert(());
        map.insert(new, Tag(2));

        assert_ne!(old, new);
        assert_eq!(map.get(old), None);
        assert_eq!(map.get(new), Some(&Tag(2)));
        assert_eq!(map.insert(old, Tag(3)), None);
        assert_eq!(map.len(), 1);
    }
}
