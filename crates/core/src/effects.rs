//! Power-up effects and area clears
//!
//! Each power-up produces at most one [`BlastEvent`]; nothing is reported when the effect
//! finds nothing to clear. Area clears (bombs) never produce events or score.

use crate::blast::BlastEvent;
use crate::board::Board;
use crate::types::{
    Block, BoardSize, Color, Position, PowerUpKind, BOMB_COLS_LEFT, BOMB_COLS_RIGHT,
    BOMB_ROWS_ABOVE, BOMB_ROWS_BELOW,
};

/// Result of one power-up effect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub event: Option<BlastEvent>,
    /// Power-up tagged blocks removed by the effect
    pub triggered: Vec<(Position, Block)>,
}

/// Most frequent color on the board; ties go to the earlier color. `None` when empty.
pub fn dominant_color(board: &Board) -> Option<Color> {
    let counts = board.color_counts();
    let mut best: Option<(Color, usize)> = None;
    for color in Color::ALL {
        let n = counts[color.index()];
        if n == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= n => {}
            _ => best = Some((color, n)),
        }
    }
    best.map(|(color, _)| color)
}

/// Apply a power-up at `target`.
///
/// `color` is reported on row and column clears; a color bomb reports the color it
/// removed. The caller validates that `target` is on the board.
pub fn apply_power_up(
    board: &mut Board,
    kind: PowerUpKind,
    target: Position,
    color: Color,
    cascade_level: u8,
) -> EffectOutcome {
    let (cells, event_color): (Vec<Position>, Color) = match kind {
        PowerUpKind::RowClear => (
            board
                .occupied()
                .filter(|(pos, _)| pos.row == target.row)
                .map(|(pos, _)| pos)
                .collect(),
            color,
        ),
        PowerUpKind::ColumnClear => (
            board
                .occupied()
                .filter(|(pos, _)| pos.col == target.col)
                .map(|(pos, _)| pos)
                .collect(),
            color,
        ),
        PowerUpKind::ColorBomb => match dominant_color(board) {
            Some(victim) => (
                board
                    .occupied()
                    .filter(|(_, block)| block.color == victim)
                    .map(|(pos, _)| pos)
                    .collect(),
                victim,
            ),
            None => (Vec::new(), color),
        },
    };

    let mut outcome = EffectOutcome::default();
    if cells.is_empty() {
        return outcome;
    }

    for &pos in &cells {
        if let Some(block) = board.clear(pos) {
            if block.power_up.is_some() {
                outcome.triggered.push((pos, block));
            }
        }
    }

    outcome.event = Some(BlastEvent {
        cells,
        color: event_color,
        cascade_level,
        power_up: Some(kind),
    });
    outcome
}

/// Positions covered by a bomb centered on `center`, clamped to the board.
///
/// Rows `center-2 ..= center+3`, columns `center-3 ..= center+2`: a 6x6 square when
/// nothing is clamped.
pub fn bomb_area(size: BoardSize, center: Position) -> Vec<Position> {
    let edge = size.edge() as i16;
    let clamp = |v: i16| v.clamp(0, edge - 1) as i8;

    let row_lo = clamp(center.row as i16 - BOMB_ROWS_ABOVE as i16);
    let row_hi = clamp(center.row as i16 + BOMB_ROWS_BELOW as i16);
    let col_lo = clamp(center.col as i16 - BOMB_COLS_LEFT as i16);
    let col_hi = clamp(center.col as i16 + BOMB_COLS_RIGHT as i16);

    (row_lo..=row_hi)
        .flat_map(|row| (col_lo..=col_hi).map(move |col| Position::new(row, col)))
        .collect()
}

/// Clear the bomb area and return the positions that actually held a block
pub fn clear_area(board: &mut Board, center: Position) -> Vec<Position> {
    bomb_area(board.size(), center)
        .into_iter()
        .filter(|&pos| board.clear(pos).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockId;

    const R: Option<Color> = Some(Color::Red);
    const G: Option<Color> = Some(Color::Green);
    const B: Option<Color> = Some(Color::Blue);
    const E: Option<Color> = None;

    #[test]
    fn test_row_clear() {
        let mut board = Board::from_color_rows(
            BoardSize::Eight,
            &[&[R, E, G], &[B, B, E]],
            1,
        );
        let out = apply_power_up(
            &mut board,
            PowerUpKind::RowClear,
            Position::new(1, 5),
            Color::Yellow,
            0,
        );
        let event = out.event.unwrap();
        assert_eq!(event.cells, vec![Position::new(1, 0), Position::new(1, 1)]);
        assert_eq!(event.color, Color::Yellow);
        assert_eq!(event.power_up, Some(PowerUpKind::RowClear));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_column_clear() {
        let mut board = Board::from_color_rows(BoardSize::Eight, &[&[R, G], &[B, E], &[E, R]], 1);
        let out = apply_power_up(
            &mut board,
            PowerUpKind::ColumnClear,
            Position::new(7, 1),
            Color::Red,
            0,
        );
        assert_eq!(out.event.unwrap().size(), 2);
        assert!(!board.is_occupied(Position::new(0, 1)));
        assert!(!board.is_occupied(Position::new(2, 1)));
        assert!(board.is_occupied(Position::new(0, 0)));
    }

    #[test]
    fn test_empty_row_produces_no_event() {
        let mut board = Board::from_color_rows(BoardSize::Eight, &[&[R]], 1);
        let out = apply_power_up(
            &mut board,
            PowerUpKind::RowClear,
            Position::new(4, 4),
            Color::Red,
            0,
        );
        assert!(out.event.is_none());
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_color_bomb_targets_most_frequent_color() {
        let mut board = Board::from_color_rows(BoardSize::Eight, &[&[R, B, B], &[G, B, R]], 1);
        let out = apply_power_up(
            &mut board,
            PowerUpKind::ColorBomb,
            Position::new(5, 5),
            Color::Purple,
            0,
        );
        let event = out.event.unwrap();
        assert_eq!(event.color, Color::Blue);
        assert_eq!(event.size(), 3);
        assert_eq!(dominant_color(&board), Some(Color::Red));
    }

    #[test]
    fn test_color_bomb_tie_breaks_by_enumeration_order() {
        let board = Board::from_color_rows(BoardSize::Eight, &[&[B, G, B, G]], 1);
        assert_eq!(dominant_color(&board), Some(Color::Green));
    }

    #[test]
    fn test_color_bomb_on_empty_board() {
        let mut board = Board::new(BoardSize::Eight);
        let out = apply_power_up(
            &mut board,
            PowerUpKind::ColorBomb,
            Position::new(0, 0),
            Color::Red,
            0,
        );
        assert!(out.event.is_none());
        assert!(dominant_color(&board).is_none());
    }

    #[test]
    fn test_effect_reports_tagged_blocks() {
        let mut board = Board::new(BoardSize::Eight);
        let tagged = Block::with_power_up(BlockId(5), Color::Red, PowerUpKind::ColumnClear);
        board.place(tagged, Position::new(3, 2));
        let out = apply_power_up(
            &mut board,
            PowerUpKind::RowClear,
            Position::new(3, 0),
            Color::Blue,
            0,
        );
        assert_eq!(out.triggered, vec![(Position::new(3, 2), tagged)]);
    }

    #[test]
    fn test_bomb_area_unclamped_is_six_by_six() {
        let area = bomb_area(BoardSize::Twelve, Position::new(5, 5));
        assert_eq!(area.len(), 36);
        assert!(area.contains(&Position::new(3, 2)));
        assert!(area.contains(&Position::new(8, 7)));
        assert!(!area.contains(&Position::new(2, 5)));
        assert!(!area.contains(&Position::new(5, 8)));
    }

    #[test]
    fn test_bomb_area_clamps_at_corner() {
        let area = bomb_area(BoardSize::Eight, Position::new(0, 0));
        // rows 0..=3, cols 0..=2
        assert_eq!(area.len(), 12);
        assert!(area.iter().all(|p| p.row >= 0 && p.col >= 0));
    }

    #[test]
    fn test_clear_area_reports_only_occupied() {
        let mut board = Board::from_color_rows(BoardSize::Eight, &[&[R, E, G]], 1);
        board.place(Block::new(BlockId(50), Color::Blue), Position::new(7, 7));
        let cleared = clear_area(&mut board, Position::new(0, 1));
        assert_eq!(cleared, vec![Position::new(0, 0), Position::new(0, 2)]);
        assert_eq!(board.occupied_count(), 1);
    }
}
