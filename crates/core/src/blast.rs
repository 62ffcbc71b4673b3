//! Blast resolver - flood-fill detection and removal of same-color groups
//!
//! One resolver pass scans the board row-major. Every unvisited occupied cell seeds a
//! breadth-first flood fill over orthogonal neighbours of the same color; every cell the
//! fill reaches is marked visited whether or not the group qualifies, so no region is
//! scanned twice. Groups at or above the minimum size are removed and reported as one
//! [`BlastEvent`] each.
//!
//! Removal is pure: nothing falls, slides or gets pushed.

use std::collections::VecDeque;

use serde::Serialize;

use crate::board::Board;
use crate::types::{Block, Color, Position, PowerUpKind, MAX_BOARD_CELLS};

/// Orthogonal neighbour steps. No diagonals.
const NEIGHBOURS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// One cleared group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlastEvent {
    pub cells: Vec<Position>,
    pub color: Color,
    pub cascade_level: u8,
    /// Power-up consumed to produce this clear, if any
    pub power_up: Option<PowerUpKind>,
}

impl BlastEvent {
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Output of one resolver pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvePass {
    pub events: Vec<BlastEvent>,
    /// Power-up tagged blocks removed by this pass, in removal order
    pub triggered: Vec<(Position, Block)>,
}

fn visit_index(board: &Board, pos: Position) -> usize {
    (pos.row as usize) * (board.edge() as usize) + (pos.col as usize)
}

fn flood_fill(board: &Board, start: Position, visited: &mut [bool; MAX_BOARD_CELLS]) -> Vec<Position> {
    let Some(color) = board.block_at(start).map(|b| b.color) else {
        return Vec::new();
    };

    let mut group = Vec::new();
    let mut queue = VecDeque::new();
    visited[visit_index(board, start)] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        group.push(pos);
        for (dr, dc) in NEIGHBOURS {
            let next = pos.offset(dr, dc);
            if !board.contains(next) {
                continue;
            }
            let idx = visit_index(board, next);
            if visited[idx] {
                continue;
            }
            if board.block_at(next).map(|b| b.color) == Some(color) {
                visited[idx] = true;
                queue.push_back(next);
            }
        }
    }

    group
}

/// Maximal orthogonally-connected same-color region containing `start`.
///
/// Empty when `start` is empty or off the board.
pub fn find_group(board: &Board, start: Position) -> Vec<Position> {
    if !board.is_occupied(start) {
        return Vec::new();
    }
    let mut visited = [false; MAX_BOARD_CELLS];
    flood_fill(board, start, &mut visited)
}

/// All same-color regions in row-major discovery order, regardless of size
pub fn find_groups(board: &Board) -> Vec<Vec<Position>> {
    let mut visited = [false; MAX_BOARD_CELLS];
    let mut groups = Vec::new();
    for pos in board.positions() {
        if visited[visit_index(board, pos)] || !board.is_occupied(pos) {
            continue;
        }
        groups.push(flood_fill(board, pos, &mut visited));
    }
    groups
}

/// Run one resolver pass: remove every group of at least `min_group_size` cells.
pub fn resolve_pass(board: &mut Board, min_group_size: usize, cascade_level: u8) -> ResolvePass {
    let mut pass = ResolvePass::default();

    for group in find_groups(board) {
        if group.len() < min_group_size.max(1) {
            continue;
        }
        let Some(color) = board.block_at(group[0]).map(|b| b.color) else {
            continue;
        };
        for &pos in &group {
            if let Some(block) = board.clear(pos) {
                if block.power_up.is_some() {
                    pass.triggered.push((pos, block));
                }
            }
        }
        pass.events.push(BlastEvent {
            cells: group,
            color,
            cascade_level,
            power_up: None,
        });
    }

    pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockId, BoardSize};

    const R: Option<Color> = Some(Color::Red);
    const B: Option<Color> = Some(Color::Blue);
    const E: Option<Color> = None;

    fn sorted(mut cells: Vec<Position>) -> Vec<Position> {
        cells.sort();
        cells
    }

    #[test]
    fn test_find_group_orthogonal_only() {
        let board = Board::from_color_rows(
            BoardSize::Eight,
            &[&[R, R, E], &[E, R, B], &[R, E, R]],
            1,
        );

        let group = sorted(find_group(&board, Position::new(0, 0)));
        assert_eq!(
            group,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]
        );

        // (2, 0) and (2, 2) only touch the group diagonally.
        assert_eq!(find_group(&board, Position::new(2, 0)).len(), 1);
        assert_eq!(find_group(&board, Position::new(2, 2)).len(), 1);
    }

    #[test]
    fn test_find_group_empty_or_out_of_bounds() {
        let board = Board::from_color_rows(BoardSize::Eight, &[&[R]], 1);
        assert!(find_group(&board, Position::new(0, 1)).is_empty());
        assert!(find_group(&board, Position::new(-1, 0)).is_empty());
    }

    #[test]
    fn test_find_groups_partitions_occupied_cells() {
        let board = Board::from_color_rows(
            BoardSize::Eight,
            &[&[R, B, B], &[R, R, B], &[B, E, R]],
            1,
        );
        let groups = find_groups(&board);
        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, board.occupied_count());
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn test_resolve_pass_clears_only_qualifying_groups() {
        let mut board = Board::from_color_rows(
            BoardSize::Eight,
            &[&[R, R, R, B], &[R, E, E, B], &[E, E, E, E]],
            1,
        );

        let pass = resolve_pass(&mut board, 4, 0);
        assert_eq!(pass.events.len(), 1);
        assert_eq!(pass.events[0].size(), 4);
        assert_eq!(pass.events[0].color, Color::Red);
        assert_eq!(pass.events[0].cascade_level, 0);
        assert!(pass.events[0].power_up.is_none());

        assert!(!board.is_occupied(Position::new(0, 0)));
        assert!(board.is_occupied(Position::new(0, 3)));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_resolve_pass_reports_triggered_power_up_blocks() {
        let mut board = Board::from_color_rows(BoardSize::Eight, &[&[R, R]], 1);
        let tagged = Block::with_power_up(BlockId(99), Color::Red, PowerUpKind::RowClear);
        board.place(tagged, Position::new(0, 2));

        let pass = resolve_pass(&mut board, 3, 2);
        assert_eq!(pass.events.len(), 1);
        assert_eq!(pass.events[0].cascade_level, 2);
        assert_eq!(pass.triggered, vec![(Position::new(0, 2), tagged)]);
    }

    #[test]
    fn test_resolve_pass_below_threshold_is_noop() {
        let mut board = Board::from_color_rows(BoardSize::Eight, &[&[R, R, B]], 1);
        let before = board.clone();
        let pass = resolve_pass(&mut board, 3, 0);
        assert!(pass.events.is_empty());
        assert_eq!(board, before);
    }
}
