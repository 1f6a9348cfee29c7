//! Simulation core: grid cells, direction buffer, session state machine,
//! maze obstacles, and food-burst particles

pub mod direction;
pub mod maze;
pub mod particles;
pub mod session;

pub use direction::Direction;
pub use session::{GameSession, RunState, StepOutcome};

use crate::config::GRID_SIZE;

/// One grid square, in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir`, unwrapped
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Center of this cell in logical pixels
    pub fn pixel_center(self) -> (f32, f32) {
        (
            (self.x * GRID_SIZE + GRID_SIZE / 2) as f32,
            (self.y * GRID_SIZE + GRID_SIZE / 2) as f32,
        )
    }
}
