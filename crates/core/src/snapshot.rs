use serde::Serialize;

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::fnv1a64;
use crate::types::{BoardSize, Color, GamePhase};

/// Read-only copy of the board for renderers: colors only, plus a content hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    pub size: BoardSize,
    pub cells: Vec<Vec<Option<Color>>>,
    /// FNV-1a 64 over one byte per cell, row-major (0 = empty, 1.. = color index + 1)
    pub board_hash: u64,
}

impl BoardSnapshot {
    pub fn from_board(board: &Board) -> Self {
        let cells = board.color_grid();
        let bytes: Vec<u8> = cells
            .iter()
            .flat_map(|row| row.iter().map(|c| c.map_or(0, |c| c.index() as u8 + 1)))
            .collect();
        Self {
            size: board.size(),
            cells,
            board_hash: fnv1a64(&bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub tray: Vec<Piece>,
    pub phase: GamePhase,
    pub score: u32,
    pub min_group_size: u32,
    pub blast_count: u32,
    pub max_combo: u32,
    pub pieces_placed: u32,
    pub continue_used: bool,
    pub trays_dealt: u32,
    pub deterministic: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
