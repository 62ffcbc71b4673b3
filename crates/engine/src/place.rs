use chroma_blast_core::{Board, Piece};

use crate::types::{PieceId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlaying,
    NotGameOver,
    PieceNotInTray,
    PowerUpPiece,
    NotPowerUp,
    OutOfBounds,
    Occupied,
    ContinueUsed,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlaying | PlaceError::NotGameOver => "wrong_phase",
            PlaceError::PieceNotInTray => "unknown_piece",
            PlaceError::PowerUpPiece | PlaceError::NotPowerUp => "wrong_piece_kind",
            PlaceError::OutOfBounds | PlaceError::Occupied => "invalid_place",
            PlaceError::ContinueUsed => "continue_used",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlaying => "game is not playing",
            PlaceError::NotGameOver => "game is not over",
            PlaceError::PieceNotInTray => "piece is not in the tray",
            PlaceError::PowerUpPiece => "power-up pieces must be activated, not placed",
            PlaceError::NotPowerUp => "piece is not a power-up",
            PlaceError::OutOfBounds => "target would place piece out of bounds",
            PlaceError::Occupied => "target cell is occupied",
            PlaceError::ContinueUsed => "continue already used this session",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Check every absolute cell of a regular piece at `origin`.
///
/// Bounds are checked before occupancy, so a piece hanging off the board reports
/// `OutOfBounds` even if its on-board cells are also blocked.
pub fn validate_placement(board: &Board, piece: &Piece, origin: Position) -> Result<(), PlaceError> {
    if piece.cells_at(origin).any(|pos| !board.contains(pos)) {
        return Err(PlaceError::OutOfBounds);
    }
    if piece.cells_at(origin).any(|pos| board.is_occupied(pos)) {
        return Err(PlaceError::Occupied);
    }
    Ok(())
}

/// Whether the piece can be used at `origin`.
///
/// A power-up piece only needs an on-board target; a regular piece needs every cell on
/// the board and empty.
pub fn can_place(board: &Board, piece: &Piece, origin: Position) -> bool {
    if piece.is_power_up() {
        return board.contains(origin);
    }
    validate_placement(board, piece, origin).is_ok()
}

/// Every origin where the piece fits, row-major
pub fn valid_origins<'a>(board: &'a Board, piece: &'a Piece) -> impl Iterator<Item = Position> + 'a {
    board
        .positions()
        .filter(move |&origin| can_place(board, piece, origin))
}

/// First tray piece (in tray order) with a valid origin, and that origin
pub fn first_valid_placement(board: &Board, tray: &[Piece]) -> Option<(PieceId, Position)> {
    tray.iter()
        .find_map(|piece| valid_origins(board, piece).next().map(|origin| (piece.id, origin)))
}

/// Exhaustive terminal scan: does any tray piece fit at any board position?
pub fn has_any_placement(board: &Board, tray: &[Piece]) -> bool {
    tray.iter()
        .any(|piece| board.positions().any(|origin| can_place(board, piece, origin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_blast_core::catalog::find_shape;
    use crate::types::{Block, BlockId, BoardSize, Color, PowerUpKind};

    fn piece(name: &str, id: u32) -> Piece {
        Piece::from_shape(PieceId(id), &find_shape(name).unwrap(), Color::Red)
    }

    fn full_board(size: BoardSize) -> Board {
        let mut board = Board::new(size);
        let mut id = 0;
        for pos in board.positions().collect::<Vec<_>>() {
            // Checkerboard of two colors so nothing is a single large group.
            let color = if (pos.row + pos.col) % 2 == 0 { Color::Red } else { Color::Blue };
            board.place(Block::new(BlockId(id), color), pos);
            id += 1;
        }
        board
    }

    #[test]
    fn test_validate_out_of_bounds_before_occupied() {
        let mut board = Board::new(BoardSize::Eight);
        board.place(Block::new(BlockId(1), Color::Red), Position::new(0, 7));
        let bar = piece("i2_h", 1);
        assert_eq!(
            validate_placement(&board, &bar, Position::new(0, 7)),
            Err(PlaceError::OutOfBounds)
        );
        assert_eq!(
            validate_placement(&board, &bar, Position::new(0, 6)),
            Err(PlaceError::Occupied)
        );
        assert_eq!(validate_placement(&board, &bar, Position::new(1, 6)), Ok(()));
    }

    #[test]
    fn test_power_up_fits_anywhere_on_board() {
        let board = full_board(BoardSize::Eight);
        let power = Piece::power_up(PieceId(9), PowerUpKind::RowClear, Color::Green);
        assert!(can_place(&board, &power, Position::new(3, 3)));
        assert!(!can_place(&board, &power, Position::new(8, 0)));
        assert!(has_any_placement(&board, &[power]));
    }

    #[test]
    fn test_full_board_has_no_placement() {
        let board = full_board(BoardSize::Nine);
        let tray = [piece("dot", 1), piece("o4", 2)];
        assert!(!has_any_placement(&board, &tray));
        assert!(first_valid_placement(&board, &tray).is_none());
    }

    #[test]
    fn test_single_hole_fits_only_dot() {
        let mut board = full_board(BoardSize::Eight);
        board.clear(Position::new(4, 4));
        let tray = [piece("o4", 1), piece("dot", 2)];
        assert_eq!(
            first_valid_placement(&board, &tray),
            Some((PieceId(2), Position::new(4, 4)))
        );
        assert_eq!(valid_origins(&board, &tray[0]).count(), 0);
    }

    #[test]
    fn test_valid_origins_on_empty_board() {
        let board = Board::new(BoardSize::Eight);
        // A 1x5 bar fits in 4 starting columns on each of 8 rows.
        assert_eq!(valid_origins(&board, &piece("i5_h", 1)).count(), 32);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PlaceError::Occupied.code(), "invalid_place");
        assert_eq!(PlaceError::NotPlaying.code(), "wrong_phase");
        assert_eq!(
            PlaceError::PowerUpPiece.to_string(),
            "wrong_piece_kind: power-up pieces must be activated, not placed"
        );
    }
}
