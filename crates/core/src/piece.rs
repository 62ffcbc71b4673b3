//! Piece module - generated tray pieces
//!
//! A piece is an immutable polyomino instance: catalog cells, a color, and an id used
//! only for tray bookkeeping. Power-up pieces are always a single cell and never
//! occupy the board.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::catalog::{CellOffset, Shape};
use crate::types::{Color, PieceId, Position, PowerUpKind, MAX_PIECE_CELLS};

/// Name reported for single-cell power-up pieces
pub const POWER_UP_SHAPE_NAME: &str = "power_up";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub id: PieceId,
    pub shape: &'static str,
    pub cells: ArrayVec<CellOffset, MAX_PIECE_CELLS>,
    pub color: Color,
    pub power_up: Option<PowerUpKind>,
}

impl Piece {
    /// Create a regular piece from a catalog shape
    pub fn from_shape(id: PieceId, shape: &Shape, color: Color) -> Self {
        let mut cells = ArrayVec::new();
        for &offset in shape.cells.iter().take(MAX_PIECE_CELLS) {
            cells.push(offset);
        }
        Self {
            id,
            shape: shape.name,
            cells,
            color,
            power_up: None,
        }
    }

    /// Create a single-cell power-up piece
    pub fn power_up(id: PieceId, kind: PowerUpKind, color: Color) -> Self {
        let mut cells = ArrayVec::new();
        cells.push((0, 0));
        Self {
            id,
            shape: POWER_UP_SHAPE_NAME,
            cells,
            color,
            power_up: Some(kind),
        }
    }

    pub fn is_power_up(&self) -> bool {
        self.power_up.is_some()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Absolute board positions when the piece origin sits at `origin`
    pub fn cells_at(&self, origin: Position) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .map(move |&(dr, dc)| origin.offset(dr, dc))
    }
}
