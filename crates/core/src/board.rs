//! Board module - manages the game grid
//!
//! The board is a square grid (8, 9, 10 or 12 cells per edge) where each cell can be
//! empty or hold one block. Storage is a flat array sized for the largest board so the
//! board is cheap to clone for pre-cascade snapshots.
//! Coordinates: `(row, col)` with row 0 at the top and col 0 at the left.
//!
//! The board is pure storage: `place` and `clear` do not validate occupancy.
//! Out-of-bounds positions are reported as `None` / `false`, never clamped.

use crate::types::{
    Block, BoardSize, Cell, Color, Position, MAX_BOARD_CELLS, MAX_BOARD_EDGE,
};

/// The game board - `edge x edge` cells using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: BoardSize,
    /// Flat array of cells, row-major order (row * MAX_BOARD_EDGE + col)
    cells: [Cell; MAX_BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: [None; MAX_BOARD_CELLS],
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.row as usize) * (MAX_BOARD_EDGE as usize) + (pos.col as usize))
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Edge length in cells
    pub fn edge(&self) -> u8 {
        self.size.edge()
    }

    /// Check if position lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        let edge = self.size.edge() as i8;
        pos.row >= 0 && pos.row < edge && pos.col >= 0 && pos.col < edge
    }

    /// Get cell at position.
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Block at position, if the position is on the board and occupied
    pub fn block_at(&self, pos: Position) -> Option<&Block> {
        self.index(pos).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// Put a block at position, replacing whatever was there.
    /// Returns false if out of bounds
    pub fn place(&mut self, block: Block, pos: Position) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = Some(block);
                true
            }
            None => false,
        }
    }

    /// Remove and return the block at position
    pub fn clear(&mut self, pos: Position) -> Option<Block> {
        let idx = self.index(pos)?;
        self.cells[idx].take()
    }

    /// Empty every cell
    pub fn clear_all(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// All on-board positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let edge = self.size.edge() as i8;
        (0..edge).flat_map(move |row| (0..edge).map(move |col| Position::new(row, col)))
    }

    /// Occupied positions with their blocks, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (Position, &Block)> + '_ {
        self.positions()
            .filter_map(move |pos| self.block_at(pos).map(|block| (pos, block)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Number of blocks per color, indexed by [`Color::index`]
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0usize; 6];
        for block in self.cells.iter().flatten() {
            counts[block.color.index()] += 1;
        }
        counts
    }

    /// Row-major color grid for snapshots (`None` for empty cells)
    pub fn color_grid(&self) -> Vec<Vec<Option<Color>>> {
        let edge = self.size.edge() as i8;
        (0..edge)
            .map(|row| {
                (0..edge)
                    .map(|col| self.block_at(Position::new(row, col)).map(|b| b.color))
                    .collect()
            })
            .collect()
    }

    /// Build a board from rows of colors for tests and fixtures.
    /// Block ids are assigned row-major starting at `first_id`.
    pub fn from_color_rows(size: BoardSize, rows: &[&[Option<Color>]], first_id: u32) -> Self {
        let mut board = Board::new(size);
        let mut next_id = first_id;
        for (r, row) in rows.iter().enumerate() {
            for (c, color) in row.iter().enumerate() {
                if let Some(color) = color {
                    let block = Block::new(crate::types::BlockId(next_id), *color);
                    next_id += 1;
                    board.place(block, Position::new(r as i8, c as i8));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}
