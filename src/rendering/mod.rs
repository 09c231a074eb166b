//! Render adapter: the per-tick snapshot handed to whatever draws the grid.
//!
//! The core never draws. It captures one [`RenderCell`] per Position-bearing
//! entity and the drawing collaborator walks the frame as often as it likes.

use bevy::ecs::prelude::*;

use crate::game::{Fruit, Position, SnakeHead};

/// What a painted cell represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellCategory {
    Head,
    Body,
    Fruit,
}

/// One grid cell to paint, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderCell {
    pub x: i32,
    pub y: i32,
    pub category: CellCategory,
}

/// Cells captured during the last tick.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderFrame {
    cells: Vec<RenderCell>,
}

impl RenderFrame {
    pub fn iter(&self) -> std::slice::Iter<'_, RenderCell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells of one category.
    pub fn of(&self, category: CellCategory) -> impl Iterator<Item = &RenderCell> {
        self.cells.iter().filter(move |cell| cell.category == category)
    }
}

impl<'a> IntoIterator for &'a RenderFrame {
    type Item = &'a RenderCell;
    type IntoIter = std::slice::Iter<'a, RenderCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Replaces the tick's frame with every Position-bearing entity.
///
/// Fruit wins over everything else; the entity marked [`SnakeHead`] is the
/// head; any other positioned entity is body.
pub fn render_capture_system(
    mut frame: ResMut<RenderFrame>,
    cells: Query<(&Position, Has<Fruit>, Has<SnakeHead>)>,
) {
    frame.cells = cells
        .iter()
        .map(|(pos, is_fruit, is_head)| {
            let category = if is_fruit {
                CellCategory::Fruit
            } else if is_head {
                CellCategory::Head
            } else {
                CellCategory::Body
            };
            RenderCell {
                x: pos.x,
                y: pos.y,
                category,
            }
        })
        .collect();
}
