//! Entity store conveniences on top of the bevy [`World`].
//!
//! Destruction is deferred. [`EntityStore::destroy`], and systems through
//! [`Commands`], only tag an entity with [`PendingDestroy`]; the entity and
//! every component on it go away when [`EntityStore::maintain`] or the
//! [`purge_destroyed`] system runs.

use bevy::ecs::prelude::*;
use tracing::trace;

/// Marks an entity for removal at the next purge.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PendingDestroy;

/// Several components of one kind attached to a single entity.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Many<T: Send + Sync + 'static>(pub Vec<T>);

/// Create, destroy and lookup operations with the store's destruction policy.
pub trait EntityStore {
    /// Spawn an entity carrying `bundle`.
    fn create<B: Bundle>(&mut self, bundle: B) -> Entity;

    /// Mark `entity` for destruction. Dead or already marked entities are
    /// left alone.
    fn destroy(&mut self, entity: Entity);

    /// Despawn every marked entity. Returns how many went away.
    fn maintain(&mut self) -> usize;

    /// Whether `entity` still exists. Marked entities are alive until purged.
    fn is_alive(&self, entity: Entity) -> bool;

    fn is_pending_destroy(&self, entity: Entity) -> bool;

    /// Every `T` on `entity`: the contents of a [`Many<T>`] if present,
    /// otherwise the single `T`, otherwise nothing.
    fn get_all<T: Component>(&self, entity: Entity) -> &[T];
}

impl EntityStore for World {
    fn create<B: Bundle>(&mut self, bundle: B) -> Entity {
        self.spawn(bundle).id()
    }

    fn destroy(&mut self, entity: Entity) {
        if let Ok(mut target) = self.get_entity_mut(entity) {
            target.insert(PendingDestroy);
        }
    }

    fn maintain(&mut self) -> usize {
        let mut marked = self.query_filtered::<Entity, With<PendingDestroy>>();
        let doomed: Vec<Entity> = marked.iter(self).collect();
        for &entity in &doomed {
            self.despawn(entity);
        }
        doomed.len()
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.get_entity(entity).is_ok()
    }

    fn is_pending_destroy(&self, entity: Entity) -> bool {
        self.get::<PendingDestroy>(entity).is_some()
    }

    fn get_all<T: Component>(&self, entity: Entity) -> &[T] {
        if let Some(many) = self.get::<Many<T>>(entity) {
            return &many.0;
        }
        self.get::<T>(entity)
            .map(std::slice::from_ref)
            .unwrap_or(&[])
    }
}

/// System that despawns everything marked since the last purge.
pub fn purge_destroyed(world: &mut World) {
    let purged = world.maintain();
    if purged > 0 {
        trace!(purged, "purged destroyed entities");
    }
}
