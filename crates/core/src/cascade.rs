//! Cascade loop - repeated resolver passes against the live threshold
//!
//! Each pass recomputes the minimum group size from the current score, removes every
//! qualifying group, fires any power-up blocks those removals consumed, and scores the
//! pass before the next one runs. The loop stops on the first empty pass or when the
//! depth ceiling is reached; hitting the ceiling just returns what was produced.

use std::collections::VecDeque;

use crate::blast::{resolve_pass, BlastEvent};
use crate::board::Board;
use crate::effects::apply_power_up;
use crate::scoring::{blast_score, min_group_size};
use crate::types::{Block, Position, ThresholdConfig};

/// Everything one cascade produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    pub events: Vec<BlastEvent>,
    pub points: u32,
    /// Resolver passes that cleared something
    pub passes: u8,
}

/// Fire power-up blocks removed at `cascade_level`, including any they remove in turn.
///
/// Events are appended to `events` in firing order.
pub fn fire_triggered(
    board: &mut Board,
    triggered: Vec<(Position, Block)>,
    cascade_level: u8,
    events: &mut Vec<BlastEvent>,
) {
    let mut pending: VecDeque<(Position, Block)> = triggered.into();
    while let Some((pos, block)) = pending.pop_front() {
        let Some(kind) = block.power_up else {
            continue;
        };
        let outcome = apply_power_up(board, kind, pos, block.color, cascade_level);
        if let Some(event) = outcome.event {
            events.push(event);
        }
        pending.extend(outcome.triggered);
    }
}

/// Score `events` against `threshold`, adding into `score`. Returns the points awarded.
pub fn score_events(events: &[BlastEvent], threshold: u32, score: &mut u32) -> u32 {
    let mut points = 0u32;
    for event in events {
        let p = blast_score(event.size() as u32, event.cascade_level, threshold);
        points = points.saturating_add(p);
    }
    *score = score.saturating_add(points);
    points
}

/// Run resolver passes starting at `start_level` until a pass clears nothing or
/// `max_depth` passes have run.
pub fn run_cascade(
    board: &mut Board,
    score: &mut u32,
    curve: &ThresholdConfig,
    start_level: u8,
    max_depth: u8,
) -> Cascade {
    let mut cascade = Cascade::default();
    let mut level = start_level;

    while cascade.passes < max_depth {
        let threshold = min_group_size(*score, curve);
        let pass = resolve_pass(board, threshold as usize, level);
        if pass.events.is_empty() {
            break;
        }

        let mut events = pass.events;
        fire_triggered(board, pass.triggered, level, &mut events);

        let points = score_events(&events, threshold, score);
        cascade.points = cascade.points.saturating_add(points);
        cascade.events.extend(events);
        cascade.passes += 1;
        level = level.saturating_add(1);
    }

    cascade
}
