//! Entity registry: the engine's record of the anchors it created.
//!
//! Backed by a hecs world. The tracking service owns the transforms; each
//! registry entity only carries the anchor handle, kind, spawn time, and an
//! optional expiry deadline.

use std::collections::HashMap;

use hecs::{Entity, World};

use arniegeddon_core::components::{Anchor, Expiry, SpawnedAt};
use arniegeddon_core::enums::EntityKind;
use arniegeddon_core::types::EntityHandle;

#[derive(Default)]
pub struct EntityRegistry {
    world: World,
    index: HashMap<EntityHandle, Entity>,
    despawn_buffer: Vec<Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly registered anchor.
    pub fn register(
        &mut self,
        handle: EntityHandle,
        kind: EntityKind,
        now: f64,
        ttl_secs: Option<f64>,
    ) -> Entity {
        let entity = match ttl_secs {
            Some(ttl) => self.world.spawn((
                Anchor(handle),
                kind,
                SpawnedAt(now),
                Expiry {
                    deadline_secs: now + ttl,
                },
            )),
            None => self.world.spawn((Anchor(handle), kind, SpawnedAt(now))),
        };
        self.index.insert(handle, entity);
        entity
    }

    /// Drop the record for `handle`, returning its kind if it was known.
    pub fn forget(&mut self, handle: EntityHandle) -> Option<EntityKind> {
        let entity = self.index.remove(&handle)?;
        let kind = self.world.get::<&EntityKind>(entity).ok().map(|k| *k);
        let _ = self.world.despawn(entity);
        kind
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.index.contains_key(&handle)
    }

    pub fn kind_of(&self, handle: EntityHandle) -> Option<EntityKind> {
        let entity = *self.index.get(&handle)?;
        self.world.get::<&EntityKind>(entity).ok().map(|k| *k)
    }

    pub fn expiry_of(&self, handle: EntityHandle) -> Option<f64> {
        let entity = *self.index.get(&handle)?;
        self.world
            .get::<&Expiry>(entity)
            .ok()
            .map(|e| e.deadline_secs)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.world
            .query::<&EntityKind>()
            .iter()
            .filter(|(_, k)| **k == kind)
            .count()
    }

    pub fn handles_of_kind(&self, kind: EntityKind) -> Vec<EntityHandle> {
        let mut handles: Vec<EntityHandle> = self
            .world
            .query::<(&Anchor, &EntityKind)>()
            .iter()
            .filter(|(_, (_, k))| **k == kind)
            .map(|(_, (anchor, _))| anchor.0)
            .collect();
        handles.sort();
        handles
    }

    /// Every known handle, oldest first.
    pub fn handles(&self) -> Vec<EntityHandle> {
        let mut handles: Vec<EntityHandle> = self.index.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Forget every entity whose deadline has passed and return their handles.
    pub fn take_expired(&mut self, now: f64) -> Vec<EntityHandle> {
        self.despawn_buffer.clear();
        let mut expired = Vec::new();
        for (entity, (anchor, expiry)) in self.world.query_mut::<(&Anchor, &Expiry)>() {
            if expiry.deadline_secs <= now {
                self.despawn_buffer.push(entity);
                expired.push(anchor.0);
            }
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
        for handle in &expired {
            self.index.remove(handle);
        }
        expired.sort();
        expired
    }

    /// `(handle, kind, spawned_at, expiry deadline)` for every entity, oldest first.
    pub fn records(&self) -> Vec<(EntityHandle, EntityKind, f64, Option<f64>)> {
        let mut records: Vec<_> = self
            .world
            .query::<(&Anchor, &EntityKind, &SpawnedAt, Option<&Expiry>)>()
            .iter()
            .map(|(_, (anchor, kind, spawned, expiry))| {
                (anchor.0, *kind, spawned.0, expiry.map(|e| e.deadline_secs))
            })
            .collect();
        records.sort_by_key(|r| r.0);
        records
    }

    /// Forget everything, returning the handles that were known.
    pub fn clear(&mut self) -> Vec<EntityHandle> {
        let handles = self.handles();
        self.world.clear();
        self.index.clear();
        handles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_forget() {
        let mut registry = EntityRegistry::new();
        let handle = EntityHandle(3);
        registry.register(handle, EntityKind::PrimaryTarget, 1.0, Some(3.0));

        assert_eq!(registry.kind_of(handle), Some(EntityKind::PrimaryTarget));
        assert_eq!(registry.expiry_of(handle), Some(4.0));
        assert_eq!(registry.forget(handle), Some(EntityKind::PrimaryTarget));
        assert_eq!(registry.forget(handle), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_take_expired_only_past_deadline() {
        let mut registry = EntityRegistry::new();
        registry.register(EntityHandle(1), EntityKind::PrimaryTarget, 0.0, Some(3.0));
        registry.register(EntityHandle(2), EntityKind::DecoyTarget, 1.0, Some(3.0));
        registry.register(EntityHandle(3), EntityKind::WeaponPickup, 0.0, None);

        assert!(registry.take_expired(2.9).is_empty());
        assert_eq!(registry.take_expired(3.0), vec![EntityHandle(1)]);
        assert_eq!(registry.take_expired(100.0), vec![EntityHandle(2)]);
        assert_eq!(registry.handles(), vec![EntityHandle(3)]);
    }

    #[test]
    fn test_count_and_list_by_kind() {
        let mut registry = EntityRegistry::new();
        registry.register(EntityHandle(5), EntityKind::WeaponPickup, 0.0, None);
        registry.register(EntityHandle(2), EntityKind::PrimaryTarget, 0.0, Some(3.0));
        registry.register(EntityHandle(4), EntityKind::WeaponPickup, 0.0, None);

        assert_eq!(registry.count_kind(EntityKind::WeaponPickup), 2);
        assert_eq!(
            registry.handles_of_kind(EntityKind::WeaponPickup),
            vec![EntityHandle(4), EntityHandle(5)]
        );
        assert_eq!(registry.records().len(), 3);
    }
}
