//! Session engine for the block puzzle.
//!
//! [`GameEngine`] owns the board, tray, generator and stats of one session and exposes the
//! gameplay operations. [`place`] holds the placement checks shared by the engine and by
//! callers that want to preview a move.

pub mod game;
pub mod place;

pub use chroma_blast_types as types;

pub use game::{BombResult, GameEngine, PlacementResult};
pub use place::{
    can_place, first_valid_placement, has_any_placement, valid_origins, validate_placement,
    PlaceError,
};
