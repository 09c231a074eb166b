//! Segment-follow system: each segment trails one step behind its parent.

use std::collections::HashMap;

use bevy::ecs::prelude::*;

use crate::error::SimulationError;
use crate::game::{Position, Segment};

// Matches every live entity so that a failed lookup means a dead handle.
type Links<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        Option<&'static mut Position>,
        Option<&'static mut Segment>,
    ),
>;

/// Moves every segment into the cell its parent just left.
///
/// A segment without a snapshot only records where its parent stands. After
/// that, whenever the parent's position differs from the snapshot, the
/// segment moves onto the snapshot and the snapshot catches up with the
/// parent. Segments closer to the head go first, so each one reads the
/// position its parent took this tick.
pub fn segment_follow_system(mut links: Links) -> Result<(), SimulationError> {
    let mut chain: Vec<(Entity, Segment)> = links
        .iter()
        .filter_map(|(entity, pos, segment)| pos.and(segment).map(|s| (entity, *s)))
        .collect();
    let parents: HashMap<Entity, Entity> = chain
        .iter()
        .filter_map(|(entity, segment)| segment.parent.map(|parent| (*entity, parent)))
        .collect();
    chain.sort_by_cached_key(|(entity, _)| depth(&parents, *entity));

    for (entity, segment) in chain {
        let Some(parent) = segment.parent else {
            continue;
        };
        let parent_pos = match links.get(parent) {
            Err(_) => {
                return Err(SimulationError::DanglingReference {
                    holder: entity,
                    target: parent,
                });
            }
            Ok((_, None, _)) => {
                return Err(SimulationError::MissingComponent {
                    entity: parent,
                    component: "Position",
                });
            }
            Ok((_, Some(pos), _)) => *pos,
        };
        let Ok((_, Some(mut pos), Some(mut segment))) = links.get_mut(entity) else {
            continue;
        };

        match segment.parent_snapshot {
            None => segment.parent_snapshot = Some(parent_pos),
            Some(snapshot) if snapshot != parent_pos => {
                *pos = snapshot;
                segment.parent_snapshot = Some(parent_pos);
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Links between `entity` and the first ancestor that is not a segment.
fn depth(parents: &HashMap<Entity, Entity>, entity: Entity) -> usize {
    let mut current = entity;
    let mut depth = 0;
    while let Some(&parent) = parents.get(&current) {
        depth += 1;
        current = parent;
        // A cycle never reaches the head; stop once every link was walked.
        if depth > parents.len() {
            break;
        }
    }
    depth
}
