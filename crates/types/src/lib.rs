//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the puzzle core.
//! Everything here is plain data: colors, power-up kinds, positions, board sizes,
//! the session lifecycle phase, and the tunable rule set.
//!
//! # Board Sizes
//!
//! Boards are square and their edge is fixed for a whole session:
//!
//! | Size | Cells | Initial threshold | Threshold cap |
//! |------|-------|-------------------|---------------|
//! | 8    | 64    | 8                 | 14            |
//! | 9    | 81    | 10                | 16            |
//! | 10   | 100   | 12                | 18            |
//! | 12   | 144   | 15                | 22            |
//!
//! Coordinates are `(row, col)` with the origin at the top-left corner. Rows grow
//! downward and columns grow rightward.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_PLACED_CELL` | 1 | Awarded per committed cell |
//! | `BLAST_POINTS_PER_CELL` | 20 | Base blast points per cleared cell |
//! | `SIZE_BONUS_TIERS` | 0/50/100/250 | Bonus for groups above the live threshold |
//!
//! # Examples
//!
//! ```
//! use chroma_blast_types::{BoardSize, Color, Position, RulesConfig};
//!
//! let size = BoardSize::from_edge(9).unwrap();
//! assert_eq!(size.cells(), 81);
//!
//! assert_eq!(Color::from_str("Blue"), Some(Color::Blue));
//! assert_eq!(Position::new(2, 3).offset(1, -1), Position::new(3, 2));
//!
//! let rules = RulesConfig::default();
//! assert_eq!(rules.threshold(size).initial, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Number of pieces offered per tray.
pub const TRAY_SIZE: usize = 3;

/// Largest supported board edge.
pub const MAX_BOARD_EDGE: u8 = 12;

/// Cell capacity of the largest supported board.
pub const MAX_BOARD_CELLS: usize = (MAX_BOARD_EDGE as usize) * (MAX_BOARD_EDGE as usize);

/// Largest polyomino in the catalog.
pub const MAX_PIECE_CELLS: usize = 5;

/// Points awarded per cell when a piece is committed to the board.
pub const POINTS_PER_PLACED_CELL: u32 = 1;

/// Base blast points per cleared cell (before size bonus and cascade multiplier).
pub const BLAST_POINTS_PER_CELL: u32 = 20;

/// Size bonus tiers as `(cells above threshold, bonus)`.
///
/// The highest tier whose `threshold + offset` does not exceed the group size wins.
pub const SIZE_BONUS_TIERS: [(u32, u32); 4] = [(0, 0), (1, 50), (2, 100), (4, 250)];

/// Default hard ceiling on cascade passes per operation.
pub const DEFAULT_MAX_CASCADE_DEPTH: u8 = 8;

/// Bomb area extents around the center, in rows above / below and columns left / right.
///
/// An unclamped bomb clears a 6x6 square.
pub const BOMB_ROWS_ABOVE: i8 = 2;
pub const BOMB_ROWS_BELOW: i8 = 3;
pub const BOMB_COLS_LEFT: i8 = 3;
pub const BOMB_COLS_RIGHT: i8 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bomb_area_is_six_by_six() {
        assert_eq!(BOMB_ROWS_ABOVE + BOMB_ROWS_BELOW + 1, 6);
        assert_eq!(BOMB_COLS_LEFT + BOMB_COLS_RIGHT + 1, 6);
    }

    #[test]
    fn size_bonus_tiers_are_sorted() {
        for pair in SIZE_BONUS_TIERS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 < pair[1].1);
        }
    }

    #[test]
    fn board_size_round_trips_through_edge() {
        for size in BoardSize::ALL {
            assert_eq!(BoardSize::from_edge(size.edge()), Some(size));
        }
        assert_eq!(BoardSize::from_edge(11), None);
    }

    #[test]
    fn rules_config_json_fills_defaults() {
        let rules: RulesConfig = serde_json::from_str(r#"{"power_up_interval": 5}"#).unwrap();
        assert_eq!(rules.power_up_interval, 5);
        assert_eq!(rules.max_cascade_depth, DEFAULT_MAX_CASCADE_DEPTH);
        assert_eq!(rules.size_12.cap, 22);
    }
}

/// The six block colors, in enumeration order.
///
/// Enumeration order matters: color-bomb ties are broken toward the earlier color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    /// All colors in enumeration order.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    /// Position of this color in [`Color::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use chroma_blast_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("PURPLE"), Some(Color::Purple));
    /// assert_eq!(Color::from_str("pink"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "orange" => Some(Color::Orange),
            "yellow" => Some(Color::Yellow),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            "purple" => Some(Color::Purple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }
}

/// Power-up kinds carried by power-up pieces and tagged blocks
///
/// - **RowClear**: clears every occupied cell in the target row
/// - **ColumnClear**: clears every occupied cell in the target column
/// - **ColorBomb**: clears every cell of the most frequent color on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    RowClear,
    ColumnClear,
    ColorBomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::RowClear,
        PowerUpKind::ColumnClear,
        PowerUpKind::ColorBomb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::RowClear => "row_clear",
            PowerUpKind::ColumnClear => "column_clear",
            PowerUpKind::ColorBomb => "color_bomb",
        }
    }
}

/// A board coordinate. Signed so that piece offsets can step off the board and be
/// rejected by bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Translate by a relative `(row, col)` offset.
    pub fn offset(self, dr: i8, dc: i8) -> Self {
        Self {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }
}

/// Supported square board sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BoardSize {
    Eight,
    Nine,
    Ten,
    Twelve,
}

impl BoardSize {
    pub const ALL: [BoardSize; 4] = [
        BoardSize::Eight,
        BoardSize::Nine,
        BoardSize::Ten,
        BoardSize::Twelve,
    ];

    /// Edge length in cells.
    pub fn edge(self) -> u8 {
        match self {
            BoardSize::Eight => 8,
            BoardSize::Nine => 9,
            BoardSize::Ten => 10,
            BoardSize::Twelve => 12,
        }
    }

    /// Total cell count.
    pub fn cells(self) -> usize {
        let e = self.edge() as usize;
        e * e
    }

    pub fn from_edge(edge: u8) -> Option<Self> {
        match edge {
            8 => Some(BoardSize::Eight),
            9 => Some(BoardSize::Nine),
            10 => Some(BoardSize::Ten),
            12 => Some(BoardSize::Twelve),
            _ => None,
        }
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        BoardSize::Nine
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = String;

    fn try_from(edge: u8) -> Result<Self, Self::Error> {
        BoardSize::from_edge(edge).ok_or_else(|| format!("unsupported board size: {}", edge))
    }
}

impl From<BoardSize> for u8 {
    fn from(size: BoardSize) -> u8 {
        size.edge()
    }
}

/// Session lifecycle
///
/// `NotStarted -> Playing <-> Paused -> GameOver`, with a single
/// `GameOver -> Playing` transition available through the continue bomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not_started",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Identity of a block on the board, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// Identity of a generated piece, used for tray bookkeeping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// A block occupying one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub color: Color,
    pub power_up: Option<PowerUpKind>,
}

impl Block {
    pub fn new(id: BlockId, color: Color) -> Self {
        Self {
            id,
            color,
            power_up: None,
        }
    }

    pub fn with_power_up(id: BlockId, color: Color, kind: PowerUpKind) -> Self {
        Self {
            id,
            color,
            power_up: Some(kind),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Cell holding exactly one block
pub type Cell = Option<Block>;

/// Difficulty curve for one board size.
///
/// The live minimum group size is
/// `min(initial + score / increase_interval, cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub initial: u32,
    pub increase_interval: u32,
    pub cap: u32,
}

impl ThresholdConfig {
    pub const fn new(initial: u32, increase_interval: u32, cap: u32) -> Self {
        Self {
            initial,
            increase_interval,
            cap,
        }
    }

    /// Default curve for a board size. Larger boards start and cap higher.
    pub fn for_size(size: BoardSize) -> Self {
        match size {
            BoardSize::Eight => Self::new(8, 1500, 14),
            BoardSize::Nine => Self::new(10, 2000, 16),
            BoardSize::Ten => Self::new(12, 2500, 18),
            BoardSize::Twelve => Self::new(15, 3000, 22),
        }
    }
}

/// Tunable rule set for a session.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub size_8: ThresholdConfig,
    pub size_9: ThresholdConfig,
    pub size_10: ThresholdConfig,
    pub size_12: ThresholdConfig,
    /// A power-up piece is injected every `power_up_interval` trays.
    pub power_up_interval: u32,
    /// First tray (1-based) that receives a power-up piece.
    pub power_up_start_tray: u32,
    /// Hard ceiling on resolver passes per operation.
    pub max_cascade_depth: u8,
}

impl RulesConfig {
    pub fn threshold(&self, size: BoardSize) -> ThresholdConfig {
        match size {
            BoardSize::Eight => self.size_8,
            BoardSize::Nine => self.size_9,
            BoardSize::Ten => self.size_10,
            BoardSize::Twelve => self.size_12,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            size_8: ThresholdConfig::for_size(BoardSize::Eight),
            size_9: ThresholdConfig::for_size(BoardSize::Nine),
            size_10: ThresholdConfig::for_size(BoardSize::Ten),
            size_12: ThresholdConfig::for_size(BoardSize::Twelve),
            power_up_interval: 3,
            power_up_start_tray: 3,
            max_cascade_depth: DEFAULT_MAX_CASCADE_DEPTH,
        }
    }
}
