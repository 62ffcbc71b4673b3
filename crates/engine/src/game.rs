//! Game engine - owns one session and drives every rule
//!
//! This module ties together the board, the tray generator, the cascade loop and the
//! power-up effects. Every public operation either fails with a [`PlaceError`] and leaves
//! the session untouched, or runs to completion (all cascade levels included) and returns
//! a result the caller can animate without re-deriving any rule.

use serde::Serialize;

use chroma_blast_core::cascade::{fire_triggered, run_cascade, score_events};
use chroma_blast_core::{
    apply_power_up, clear_area, min_group_size, placement_score, BlastEvent, Board,
    BoardSnapshot, GameSnapshot, Piece, PieceGenerator, RngMode, Tray,
};

use crate::place::{can_place, first_valid_placement, has_any_placement, validate_placement, PlaceError};
use crate::types::{
    Block, BlockId, BoardSize, Color, GamePhase, PieceId, Position, PowerUpKind, RulesConfig,
};

/// Outcome of a successful placement or power-up activation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    /// Every clear, in the order it happened, across all cascade levels
    pub blasts: Vec<BlastEvent>,
    /// Board before any clearing, only when at least one blast happened
    #[serde(skip)]
    pub pre_cascade_board: Option<Board>,
    /// Points gained by this operation (placement plus blasts)
    pub points: u32,
    /// Number of blast events produced by this operation
    pub combo: u32,
    pub game_over: bool,
}

/// Outcome of a bomb area clear
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BombResult {
    /// Positions that held a block and were emptied
    pub cleared: Vec<Position>,
    /// True when a continue bomb brought the session back to `Playing`
    pub resumed: bool,
    pub game_over: bool,
}

/// One play session
#[derive(Debug, Clone)]
pub struct GameEngine {
    rules: RulesConfig,
    size: BoardSize,
    mode: RngMode,
    board: Board,
    tray: Tray,
    generator: PieceGenerator,
    phase: GamePhase,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    next_block_id: u32,
    score: u32,
    blast_count: u32,
    max_combo: u32,
    pieces_placed: u32,
    continue_used: bool,
}

impl GameEngine {
    /// Create an engine that has not started a session yet
    pub fn new(rules: RulesConfig) -> Self {
        let size = BoardSize::default();
        let mode = RngMode::Random;
        Self {
            rules,
            size,
            mode,
            board: Board::new(size),
            tray: Tray::new(),
            generator: PieceGenerator::new(mode, &rules),
            phase: GamePhase::NotStarted,
            session_id: 0,
            next_block_id: 0,
            score: 0,
            blast_count: 0,
            max_combo: 0,
            pieces_placed: 0,
            continue_used: false,
        }
    }

    /// Start a new session, discarding everything from the previous one.
    pub fn start(&mut self, size: BoardSize, mode: RngMode) {
        self.reset(size, mode);
        self.tray = self.generator.next_tray();
        self.phase = GamePhase::Playing;
        self.check_terminal();
    }

    /// Start again with the same board size and RNG mode.
    ///
    /// In seeded mode this replays the same tray sequence.
    pub fn restart(&mut self) {
        self.start(self.size, self.mode);
    }

    /// Start a session from a prepared position (daily puzzles, fixtures).
    ///
    /// The board's size becomes the session size. `tray` is offered first; the generator
    /// for `mode` deals its first tray only when `tray` is empty or used up.
    pub fn start_from(&mut self, board: Board, tray: Tray, score: u32, mode: RngMode) {
        self.reset(board.size(), mode);
        self.next_block_id = board
            .occupied()
            .map(|(_, block)| block.id.0.wrapping_add(1))
            .max()
            .unwrap_or(0);
        self.board = board;
        self.score = score;
        self.tray = if tray.is_empty() {
            self.generator.next_tray()
        } else {
            tray
        };
        self.phase = GamePhase::Playing;
        self.check_terminal();
    }

    /// Fresh session state with an undealt generator.
    fn reset(&mut self, size: BoardSize, mode: RngMode) {
        let next_session = self.session_id.wrapping_add(1);
        *self = Self::new(self.rules);
        self.session_id = next_session;
        self.size = size;
        self.mode = mode;
        self.board = Board::new(size);
        self.generator = PieceGenerator::new(mode, &self.rules);
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_size(&self) -> BoardSize {
        self.size
    }

    pub fn mode(&self) -> RngMode {
        self.mode
    }

    pub fn tray(&self) -> &[Piece] {
        &self.tray
    }

    pub fn tray_piece(&self, id: PieceId) -> Option<&Piece> {
        self.tray.iter().find(|p| p.id == id)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn blast_count(&self) -> u32 {
        self.blast_count
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn continue_used(&self) -> bool {
        self.continue_used
    }

    pub fn trays_dealt(&self) -> u32 {
        self.generator.trays_dealt()
    }

    /// Live minimum blast group size for the current score
    pub fn min_group_size(&self) -> u32 {
        min_group_size(self.score, &self.rules.threshold(self.size))
    }

    /// Whether the tray piece could be used at `origin` right now
    pub fn can_place(&self, id: PieceId, origin: Position) -> bool {
        self.phase == GamePhase::Playing
            && self
                .tray_piece(id)
                .is_some_and(|piece| can_place(&self.board, piece, origin))
    }

    /// First usable (piece, origin) pair in tray order, if any
    pub fn hint(&self) -> Option<(PieceId, Position)> {
        first_valid_placement(&self.board, &self.tray)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: BoardSnapshot::from_board(&self.board),
            tray: self.tray.to_vec(),
            phase: self.phase,
            score: self.score,
            min_group_size: self.min_group_size(),
            blast_count: self.blast_count,
            max_combo: self.max_combo,
            pieces_placed: self.pieces_placed,
            continue_used: self.continue_used,
            trays_dealt: self.generator.trays_dealt(),
            deterministic: self.mode.is_deterministic(),
        }
    }

    /// Commit a regular tray piece with its origin at `origin`, then resolve.
    pub fn place_piece(&mut self, id: PieceId, origin: Position) -> Result<PlacementResult, PlaceError> {
        if self.phase != GamePhase::Playing {
            return Err(PlaceError::NotPlaying);
        }
        let idx = self.tray_index(id)?;
        let piece = &self.tray[idx];
        if piece.is_power_up() {
            return Err(PlaceError::PowerUpPiece);
        }
        validate_placement(&self.board, piece, origin)?;

        // Validation passed; from here on the operation always completes.
        let piece = self.tray.remove(idx);
        for pos in piece.cells_at(origin) {
            let block = Block::new(self.allocate_block_id(), piece.color);
            self.board.place(block, pos);
        }

        let placed_points = placement_score(piece.cell_count());
        self.score = self.score.saturating_add(placed_points);
        self.pieces_placed = self.pieces_placed.saturating_add(1);

        let pre_cascade = self.board.clone();
        let cascade = run_cascade(
            &mut self.board,
            &mut self.score,
            &self.rules.threshold(self.size),
            0,
            self.rules.max_cascade_depth,
        );

        Ok(self.settle(
            cascade.events,
            pre_cascade,
            placed_points.saturating_add(cascade.points),
        ))
    }

    /// Use a power-up tray piece on `origin`, then resolve.
    pub fn activate_power_up(&mut self, id: PieceId, origin: Position) -> Result<PlacementResult, PlaceError> {
        if self.phase != GamePhase::Playing {
            return Err(PlaceError::NotPlaying);
        }
        let idx = self.tray_index(id)?;
        let Some(kind) = self.tray[idx].power_up else {
            return Err(PlaceError::NotPowerUp);
        };
        if !self.board.contains(origin) {
            return Err(PlaceError::OutOfBounds);
        }

        let piece = self.tray.remove(idx);
        let pre_effect = self.board.clone();
        let threshold = self.min_group_size();

        let outcome = apply_power_up(&mut self.board, kind, origin, piece.color, 0);
        let mut events: Vec<BlastEvent> = outcome.event.into_iter().collect();
        fire_triggered(&mut self.board, outcome.triggered, 0, &mut events);
        let effect_points = score_events(&events, threshold, &mut self.score);

        let cascade = run_cascade(
            &mut self.board,
            &mut self.score,
            &self.rules.threshold(self.size),
            1,
            self.rules.max_cascade_depth,
        );
        events.extend(cascade.events);

        Ok(self.settle(events, pre_effect, effect_points.saturating_add(cascade.points)))
    }

    /// Continue after game over: clear the bomb area around `center`.
    ///
    /// Allowed once per session. The session resumes only if something fits afterwards;
    /// otherwise the continue is spent and the game stays over.
    pub fn use_bomb(&mut self, center: Position) -> Result<BombResult, PlaceError> {
        if self.phase != GamePhase::GameOver {
            return Err(PlaceError::NotGameOver);
        }
        if self.continue_used {
            return Err(PlaceError::ContinueUsed);
        }
        if !self.board.contains(center) {
            return Err(PlaceError::OutOfBounds);
        }

        self.continue_used = true;
        let cleared = clear_area(&mut self.board, center);
        let resumed = has_any_placement(&self.board, &self.tray);
        if resumed {
            self.phase = GamePhase::Playing;
        }

        Ok(BombResult {
            cleared,
            resumed,
            game_over: !resumed,
        })
    }

    /// Paid area clear during play. The cost is the caller's concern.
    pub fn use_coin_bomb(&mut self, center: Position) -> Result<BombResult, PlaceError> {
        if self.phase != GamePhase::Playing {
            return Err(PlaceError::NotPlaying);
        }
        if !self.board.contains(center) {
            return Err(PlaceError::OutOfBounds);
        }

        let cleared = clear_area(&mut self.board, center);
        let game_over = self.check_terminal();
        Ok(BombResult {
            cleared,
            resumed: false,
            game_over,
        })
    }

    /// Drop a lone power-up block onto an empty cell.
    ///
    /// The block fires its effect when a blast or another effect clears it.
    pub fn spawn_power_up_block(
        &mut self,
        pos: Position,
        kind: PowerUpKind,
        color: Color,
    ) -> Result<BlockId, PlaceError> {
        if self.phase != GamePhase::Playing {
            return Err(PlaceError::NotPlaying);
        }
        if !self.board.contains(pos) {
            return Err(PlaceError::OutOfBounds);
        }
        if self.board.is_occupied(pos) {
            return Err(PlaceError::Occupied);
        }

        let id = self.allocate_block_id();
        self.board.place(Block::with_power_up(id, color, kind), pos);
        self.check_terminal();
        Ok(id)
    }

    /// Toggle `Playing -> Paused`. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Toggle `Paused -> Playing`. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// End the session from outside (e.g. the caller's round timer ran out).
    pub fn force_game_over(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing | GamePhase::Paused => {
                self.phase = GamePhase::GameOver;
                true
            }
            GamePhase::NotStarted | GamePhase::GameOver => false,
        }
    }

    fn tray_index(&self, id: PieceId) -> Result<usize, PlaceError> {
        self.tray
            .iter()
            .position(|p| p.id == id)
            .ok_or(PlaceError::PieceNotInTray)
    }

    fn allocate_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_block_id);
        self.next_block_id = self.next_block_id.wrapping_add(1);
        id
    }

    /// Record stats, refill the tray if empty, and run the terminal check.
    fn settle(&mut self, blasts: Vec<BlastEvent>, before: Board, points: u32) -> PlacementResult {
        let combo = blasts.len() as u32;
        self.blast_count = self.blast_count.saturating_add(combo);
        self.max_combo = self.max_combo.max(combo);

        if self.tray.is_empty() {
            self.tray = self.generator.next_tray();
        }
        let game_over = self.check_terminal();

        PlacementResult {
            pre_cascade_board: if blasts.is_empty() { None } else { Some(before) },
            blasts,
            points,
            combo,
            game_over,
        }
    }

    /// Exhaustive scan of tray x board. Moves `Playing` to `GameOver` when nothing fits.
    fn check_terminal(&mut self) -> bool {
        if self.phase == GamePhase::Playing && !has_any_placement(&self.board, &self.tray) {
            self.phase = GamePhase::GameOver;
        }
        self.phase == GamePhase::GameOver
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}
