//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board, the piece catalog, randomness, tray generation, the
//! blast resolver and scoring. It has **zero dependencies** on UI, networking, or I/O:
//!
//! - **Deterministic**: a seeded session produces the same trays on every platform
//! - **Testable**: every rule is a plain function over a board or a generator
//! - **Portable**: runs headless, in a terminal, or behind any renderer
//!
//! # Module Structure
//!
//! - [`board`]: square grid of optional blocks with bounds-checked queries
//! - [`catalog`]: polyomino templates in five weighted size categories
//! - [`rng`]: FNV-1a daily seeding, SplitMix64, and the entropy/seeded switch
//! - [`generator`]: tray dealing with a forced large piece and power-up cadence
//! - [`blast`]: flood-fill group detection and removal
//! - [`effects`]: row, column and color-bomb power-ups plus bomb area clears
//! - [`cascade`]: the multi-pass resolve loop against the live threshold
//! - [`scoring`]: placement points, blast points and the difficulty curve
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Example
//!
//! ```
//! use chroma_blast_core::{PieceGenerator, RngMode};
//! use chroma_blast_core::types::{RulesConfig, TRAY_SIZE};
//!
//! let mut a = PieceGenerator::new(RngMode::daily("2026-02-11"), &RulesConfig::default());
//! let mut b = PieceGenerator::new(RngMode::daily("2026-02-11"), &RulesConfig::default());
//!
//! let tray = a.next_tray();
//! assert_eq!(tray.len(), TRAY_SIZE);
//! assert_eq!(tray, b.next_tray());
//! ```

pub mod blast;
pub mod board;
pub mod cascade;
pub mod catalog;
pub mod effects;
pub mod generator;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use chroma_blast_types as types;

// Re-export commonly used types for convenience
pub use blast::{find_group, find_groups, resolve_pass, BlastEvent};
pub use board::Board;
pub use cascade::{run_cascade, Cascade};
pub use catalog::{Shape, ShapeCategory, CATALOG};
pub use effects::{apply_power_up, bomb_area, clear_area, dominant_color};
pub use generator::{PieceGenerator, Tray};
pub use piece::Piece;
pub use rng::{GameRng, RandomSource, RngMode, SplitMix64};
pub use scoring::{blast_score, min_group_size, placement_score, size_bonus};
pub use snapshot::{BoardSnapshot, GameSnapshot};
