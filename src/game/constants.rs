//! Default grid size, timing and spawn constants.

use super::{Direction, Position};

// Grid dimensions
pub const CELL_SIZE: i32 = 30;
pub const GRID_WIDTH: i32 = 20;
pub const GRID_HEIGHT: i32 = 15;

// Timing, in ticks
pub const ENERGY_THRESHOLD: u32 = 30;
pub const FRUIT_LIFETIME: i32 = 30 * ENERGY_THRESHOLD as i32;

// Initial snake
pub const INITIAL_HEAD_POSITION: Position = Position::new(2 * CELL_SIZE, 0);
pub const INITIAL_DIRECTION: Direction = Direction::Down;
pub const INITIAL_ENERGY: u32 = 1;
