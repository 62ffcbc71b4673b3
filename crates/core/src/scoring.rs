//! Scoring module - placement points, blast points and the difficulty curve
//!
//! - Placement awards `cells * POINTS_PER_PLACED_CELL`.
//! - A blast event scores `(size * BLAST_POINTS_PER_CELL + size_bonus) * 2^cascade_level`.
//! - The minimum blast group size grows with score: `min(initial + score / interval, cap)`.
//!
//! All arithmetic saturates; score never wraps.

use crate::types::{ThresholdConfig, BLAST_POINTS_PER_CELL, POINTS_PER_PLACED_CELL, SIZE_BONUS_TIERS};

/// Points for committing a piece of `cells` cells
pub fn placement_score(cells: usize) -> u32 {
    (cells as u32).saturating_mul(POINTS_PER_PLACED_CELL)
}

/// Live minimum group size for a score.
///
/// Non-decreasing in `score` and never above `curve.cap`. A zero interval disables growth.
pub fn min_group_size(score: u32, curve: &ThresholdConfig) -> u32 {
    let steps = if curve.increase_interval == 0 {
        0
    } else {
        score / curve.increase_interval
    };
    curve.initial.saturating_add(steps).min(curve.cap)
}

/// Bonus for a group relative to the live threshold.
///
/// Takes the highest tier whose `threshold + offset` is at most `group_size`, else 0.
pub fn size_bonus(group_size: u32, threshold: u32) -> u32 {
    SIZE_BONUS_TIERS
        .iter()
        .rev()
        .find(|&&(offset, _)| threshold.saturating_add(offset) <= group_size)
        .map(|&(_, bonus)| bonus)
        .unwrap_or(0)
}

/// Cascade multiplier `2^level`, saturating
pub fn cascade_multiplier(level: u8) -> u32 {
    1u32.checked_shl(level as u32).unwrap_or(u32::MAX)
}

/// Score of one blast event
pub fn blast_score(group_size: u32, cascade_level: u8, threshold: u32) -> u32 {
    group_size
        .saturating_mul(BLAST_POINTS_PER_CELL)
        .saturating_add(size_bonus(group_size, threshold))
        .saturating_mul(cascade_multiplier(cascade_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoardSize;

    #[test]
    fn test_placement_score() {
        assert_eq!(placement_score(0), 0);
        assert_eq!(placement_score(5), 5);
    }

    #[test]
    fn test_min_group_size_curve() {
        let curve = ThresholdConfig::for_size(BoardSize::Nine);
        assert_eq!(min_group_size(0, &curve), 10);
        assert_eq!(min_group_size(1999, &curve), 10);
        assert_eq!(min_group_size(2000, &curve), 11);
        assert_eq!(min_group_size(9999, &curve), 14);
        assert_eq!(min_group_size(u32::MAX, &curve), 16);
    }

    #[test]
    fn test_min_group_size_zero_interval() {
        let curve = ThresholdConfig::new(6, 0, 9);
        assert_eq!(min_group_size(1_000_000, &curve), 6);
    }

    #[test]
    fn test_size_bonus_tiers() {
        assert_eq!(size_bonus(9, 10), 0);
        assert_eq!(size_bonus(10, 10), 0);
        assert_eq!(size_bonus(11, 10), 50);
        assert_eq!(size_bonus(12, 10), 100);
        assert_eq!(size_bonus(13, 10), 100);
        assert_eq!(size_bonus(14, 10), 250);
        assert_eq!(size_bonus(40, 10), 250);
    }

    #[test]
    fn test_blast_score_example() {
        // 11-cell group at threshold 10, no cascade: 11 * 20 + 50.
        assert_eq!(blast_score(11, 0, 10), 270);
        // Same group one cascade level deeper doubles.
        assert_eq!(blast_score(11, 1, 10), 540);
        assert_eq!(blast_score(10, 2, 10), 800);
    }

    #[test]
    fn test_cascade_multiplier_saturates() {
        assert_eq!(cascade_multiplier(0), 1);
        assert_eq!(cascade_multiplier(3), 8);
        assert_eq!(cascade_multiplier(40), u32::MAX);
        assert_eq!(blast_score(100, 40, 10), u32::MAX);
    }
}
