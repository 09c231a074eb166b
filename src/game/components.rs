//! ECS components for the snake simulation.

use std::collections::VecDeque;

use bevy::ecs::prelude::*;

/// Grid position in pixel units; always a multiple of the cell size.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this position collides with another position.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Directional movement with buffered turns and a speed governor.
///
/// `energy` grows by one every tick; once it exceeds the configured
/// threshold the entity takes a single step and `energy` starts over.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    pub direction: Direction,
    pub pending: VecDeque<Direction>,
    pub energy: u32,
}

impl Movement {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            pending: VecDeque::new(),
            energy: 0,
        }
    }

    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = energy;
        self
    }

    /// Queue a turn, rejecting any that would reverse into the body.
    ///
    /// A turn equal to the current direction or to its opposite is dropped.
    /// With turns already queued, the new one must also differ from the last
    /// queued turn and from that turn's opposite. Returns whether the turn
    /// was queued.
    pub fn request_turn(&mut self, requested: Direction) -> bool {
        if requested == self.direction || requested == self.direction.opposite() {
            return false;
        }
        if let Some(&last) = self.pending.back() {
            if requested == last || requested == last.opposite() {
                return false;
            }
        }
        self.pending.push_back(requested);
        true
    }

    /// Take the next queued turn, if any, making it the current direction.
    pub fn advance_direction(&mut self) -> Direction {
        if let Some(next) = self.pending.pop_front() {
            self.direction = next;
        }
        self.direction
    }
}

/// A body segment chasing the entity in front of it.
///
/// `parent` is a plain handle, not ownership: the segment only reads the
/// parent's position. `parent_snapshot` is where the parent stood when last
/// observed.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Segment {
    pub parent: Option<Entity>,
    pub parent_snapshot: Option<Position>,
}

impl Segment {
    /// Segment that records its parent's position on the next follow pass.
    pub fn following(parent: Entity) -> Self {
        Self {
            parent: Some(parent),
            parent_snapshot: None,
        }
    }
}

/// Aggregate tracking both ends of the follow-chain.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnakeBody {
    pub head: Entity,
    pub tail: Entity,
    /// Set by collision (or the debug trigger), consumed by growth.
    pub grow: bool,
}

/// Food with a countdown in ticks.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fruit {
    pub lifetime: i32,
}

/// Component to mark the snake's head.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct SnakeHead;

/// Component to mark entities steered by player input.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PlayerControlled;
