//! Direction vectors, walkability and tunnel wraparound on the maze grid

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::maze::{CellType, Maze};

/// Integer grid coordinate
pub type Position = IVec2;

/// Four-way movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order used by `valid_directions`
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction (y grows downward)
    #[inline]
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl Maze {
    /// False for out-of-bounds positions and walls; everything else is open.
    pub fn walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.classify(pos.x, pos.y) != CellType::Wall
    }

    /// Horizontal tunnel wraparound. Rows are never wrapped.
    pub fn wrap(&self, pos: Position) -> Position {
        let x = if pos.x < 0 {
            self.width() - 1
        } else if pos.x >= self.width() {
            0
        } else {
            pos.x
        };
        IVec2::new(x, pos.y)
    }

    /// One step in `dir`, wrapped
    #[inline]
    pub fn next_position(&self, pos: Position, dir: Direction) -> Position {
        self.wrap(pos + dir.vector())
    }

    /// Directions whose next position is walkable, in `Direction::ALL` order
    pub fn valid_directions(&self, pos: Position) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.walkable(self.next_position(pos, d)))
            .collect()
    }
}
