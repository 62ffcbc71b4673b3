//! Chroma Blast (workspace facade crate).
//!
//! Re-exports the `chroma_blast::{core,engine,types}` public API while the implementation
//! lives in dedicated crates under `crates/`.

pub mod cli;
pub mod logging;

pub use chroma_blast_core as core;
pub use chroma_blast_engine as engine;
pub use chroma_blast_types as types;
