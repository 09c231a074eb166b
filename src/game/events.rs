//! Game events (messages).

use bevy::ecs::prelude::*;

use super::Position;

/// Something noteworthy that happened during a tick.
///
/// The core only writes these; collaborators drain them after each tick.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    FruitSpawned { fruit: Entity, position: Position },
    FruitExpired { fruit: Entity },
    FruitEaten { fruit: Entity, position: Position },
    SegmentGrown { segment: Entity, position: Position },
}
