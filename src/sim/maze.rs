//! Static maze layout and the mutable pellet grid derived from it
//!
//! The layout is an immutable table of integer codes. The grid is built from it
//! once per level and is the single source of truth for remaining pellets.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::MazeError;

/// Reference maze (19 x 21).
///
/// Legend: 0 = empty, 1 = wall, 2 = pellet, 3 = power pellet, 4 = ghost house
#[rustfmt::skip]
pub const CLASSIC_LAYOUT: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 3, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 3, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 1, 2, 1, 2, 1, 1, 1, 2, 1, 2, 1, 1, 1, 2, 1],
    [1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 1, 2, 1, 0, 0, 4, 0, 0, 1, 2, 1, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 2, 1, 0, 4, 4, 4, 0, 1, 2, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0, 2, 0, 0, 4, 4, 4, 0, 0, 2, 0, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 2, 1, 0, 4, 4, 4, 0, 1, 2, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 2, 1],
    [1, 3, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 3, 1],
    [1, 1, 2, 1, 2, 1, 2, 1, 1, 1, 1, 1, 2, 1, 2, 1, 2, 1, 1],
    [1, 2, 2, 2, 2, 1, 2, 2, 2, 1, 2, 2, 2, 1, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Cell classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Wall,
    Empty,
    Pellet,
    PowerPellet,
    GhostHouse,
    /// Edge-column empty cell whose wraparound partner is open
    Tunnel,
}

impl CellType {
    /// Map a layout code to its cell type. Unknown codes are walls.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => CellType::Empty,
            1 => CellType::Wall,
            2 => CellType::Pellet,
            3 => CellType::PowerPellet,
            4 => CellType::GhostHouse,
            _ => CellType::Wall,
        }
    }
}

/// Immutable maze layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    width: i32,
    height: i32,
    /// Row-major layout codes
    codes: Vec<u8>,
}

impl Default for Maze {
    fn default() -> Self {
        Self::classic()
    }
}

impl Maze {
    /// The reference 19 x 21 maze
    pub fn classic() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            codes: CLASSIC_LAYOUT.iter().flatten().copied().collect(),
        }
    }

    /// Build a maze from rows of layout codes. Rows must be non-empty and equal length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MazeError> {
        let expected = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        let mut codes = Vec::with_capacity(expected * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != expected {
                return Err(MazeError::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            codes.extend_from_slice(cells);
        }

        Ok(Self {
            width: expected as i32,
            height: rows.len() as i32,
            codes,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    /// Classify a cell. Out-of-bounds coordinates are walls.
    pub fn classify(&self, x: i32, y: i32) -> CellType {
        self.index(IVec2::new(x, y))
            .map(|i| CellType::from_code(self.codes[i]))
            .unwrap_or(CellType::Wall)
    }

    /// Whether (x, y) is an open edge cell that the horizontal wrap connects
    /// to an open cell on the opposite edge.
    fn is_tunnel(&self, x: i32, y: i32) -> bool {
        let partner = if x == 0 {
            self.width - 1
        } else if x == self.width - 1 {
            0
        } else {
            return false;
        };
        self.classify(x, y) == CellType::Empty && self.classify(partner, y) != CellType::Wall
    }

    /// Materialize the per-cell pellet grid
    pub fn build_grid(&self) -> Grid {
        let mut cells = Vec::with_capacity(self.codes.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let mut kind = self.classify(x, y);
                if self.is_tunnel(x, y) {
                    kind = CellType::Tunnel;
                }
                cells.push(Cell {
                    pos: IVec2::new(x, y),
                    kind,
                    has_pellet: kind == CellType::Pellet,
                    has_power_pellet: kind == CellType::PowerPellet,
                });
            }
        }

        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub pos: IVec2,
    pub kind: CellType,
    pub has_pellet: bool,
    pub has_power_pellet: bool,
}

impl Cell {
    /// True if either kind of pellet is still here
    #[inline]
    pub fn has_any_pellet(&self) -> bool {
        self.has_pellet || self.has_power_pellet
    }
}

/// Mutable per-level pellet grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        (pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    pub fn get(&self, pos: IVec2) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: IVec2) -> Option<&mut Cell> {
        let i = self.index(pos)?;
        self.cells.get_mut(i)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows top to bottom (for renderers)
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Number of cells still holding a pellet or power pellet
    pub fn count_remaining(&self) -> u32 {
        self.cells.iter().filter(|c| c.has_any_pellet()).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_legend() {
        let maze = Maze::from_rows(&[[0u8, 1, 2, 3, 4, 9]]).unwrap();
        assert_eq!(maze.classify(0, 0), CellType::Empty);
        assert_eq!(maze.classify(1, 0), CellType::Wall);
        assert_eq!(maze.classify(2, 0), CellType::Pellet);
        assert_eq!(maze.classify(3, 0), CellType::PowerPellet);
        assert_eq!(maze.classify(4, 0), CellType::GhostHouse);
        // Unknown code falls back to wall
        assert_eq!(maze.classify(5, 0), CellType::Wall);
    }

    #[test]
    fn test_classify_out_of_bounds_is_wall() {
        let maze = Maze::classic();
        assert_eq!(maze.classify(-1, 9), CellType::Wall);
        assert_eq!(maze.classify(BOARD_WIDTH, 9), CellType::Wall);
        assert_eq!(maze.classify(5, -1), CellType::Wall);
        assert_eq!(maze.classify(5, BOARD_HEIGHT), CellType::Wall);
    }

    #[test]
    fn test_from_rows_rejects_bad_layouts() {
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(Maze::from_rows(&empty), Err(MazeError::Empty));

        let rows: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 2]];
        assert_eq!(
            Maze::from_rows(&rows),
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_classic_grid_pellets() {
        let grid = Maze::classic().build_grid();
        assert_eq!(grid.width(), BOARD_WIDTH);
        assert_eq!(grid.height(), BOARD_HEIGHT);
        // 141 pellets + 4 power pellets
        assert_eq!(grid.count_remaining(), 145);
        assert!(grid.get(IVec2::new(1, 2)).unwrap().has_power_pellet);
        assert!(grid.get(IVec2::new(1, 1)).unwrap().has_pellet);
        assert!(!grid.get(IVec2::new(0, 0)).unwrap().has_any_pellet());
        assert!(grid.get(IVec2::new(-1, 0)).is_none());
    }

    #[test]
    fn test_tunnel_cells_marked() {
        let maze = Maze::classic();
        let grid = maze.build_grid();
        assert_eq!(grid.get(IVec2::new(0, 9)).unwrap().kind, CellType::Tunnel);
        assert_eq!(grid.get(IVec2::new(18, 9)).unwrap().kind, CellType::Tunnel);
        // Interior empty cell stays empty, and classify follows the legend only
        assert_eq!(grid.get(IVec2::new(1, 9)).unwrap().kind, CellType::Empty);
        assert_eq!(maze.classify(0, 9), CellType::Empty);
    }

    #[test]
    fn test_count_remaining_tracks_mutation() {
        let mut grid = Maze::classic().build_grid();
        let cell = grid.get_mut(IVec2::new(1, 1)).unwrap();
        cell.has_pellet = false;
        assert_eq!(grid.count_remaining(), 144);
    }

    #[test]
    fn test_rows_iterate_top_to_bottom() {
        let grid = Maze::from_rows(&[[1u8, 2], [3, 0]]).unwrap().build_grid();
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0].kind, CellType::PowerPellet);
    }
}
