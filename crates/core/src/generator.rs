//! Piece generator - deals trays from the catalog
//!
//! Each call to [`PieceGenerator::next_tray`] produces [`TRAY_SIZE`] pieces:
//!
//! 1. One forced draw from the 3/4/5-cell categories, so early boards stay playable.
//! 2. The remaining draws use weighted category selection over the full catalog.
//! 3. On power-up trays one of the non-forced slots becomes a single-cell power-up piece.
//! 4. The tray is shuffled so the forced piece is not always first.
//!
//! Every draw goes through the generator's own [`GameRng`], in that fixed order. In seeded
//! mode this makes the tray sequence a pure function of the seed and the number of trays
//! dealt.

use arrayvec::ArrayVec;

use crate::catalog::{categories_with_min_cells, ShapeCategory, CATALOG};
use crate::piece::Piece;
use crate::rng::{GameRng, RandomSource, RngMode};
use crate::types::{Color, PieceId, PowerUpKind, RulesConfig, TRAY_SIZE};

/// Minimum cell count of the forced first draw
pub const FORCED_MIN_CELLS: usize = 3;

/// One dealt tray
pub type Tray = ArrayVec<Piece, TRAY_SIZE>;

/// Weighted category pick.
///
/// Draws `roll` in `[0, total)` and walks the categories in order, taking the first one
/// with `roll < weight` and otherwise subtracting its weight. A roll landing exactly on a
/// boundary belongs to the next category, matching the half-open `next_f64` interval.
pub fn pick_weighted<'a, R: RandomSource>(
    rng: &mut R,
    categories: &[&'a ShapeCategory],
) -> Option<&'a ShapeCategory> {
    let total: u32 = categories.iter().map(|c| c.weight).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.next_f64() * total as f64;
    for &cat in categories {
        let weight = cat.weight as f64;
        if roll < weight {
            return Some(cat);
        }
        roll -= weight;
    }

    // Float rounding can leave a sliver past the last boundary.
    categories.last().copied()
}

#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: GameRng,
    mode: RngMode,
    trays_dealt: u32,
    next_piece_id: u32,
    power_up_interval: u32,
    power_up_start_tray: u32,
}

impl PieceGenerator {
    /// Create a generator with a fresh RNG for the given mode
    pub fn new(mode: RngMode, rules: &RulesConfig) -> Self {
        Self {
            rng: GameRng::from_mode(mode),
            mode,
            trays_dealt: 0,
            next_piece_id: 0,
            power_up_interval: rules.power_up_interval,
            power_up_start_tray: rules.power_up_start_tray,
        }
    }

    pub fn mode(&self) -> RngMode {
        self.mode
    }

    /// Number of trays produced so far
    pub fn trays_dealt(&self) -> u32 {
        self.trays_dealt
    }

    /// Whether the 1-based `tray_number` receives a power-up piece
    pub fn is_power_up_tray(&self, tray_number: u32) -> bool {
        self.power_up_interval > 0
            && tray_number >= self.power_up_start_tray
            && (tray_number - self.power_up_start_tray) % self.power_up_interval == 0
    }

    /// Deal the next tray
    pub fn next_tray(&mut self) -> Tray {
        let mut tray = Tray::new();

        let large: Vec<&ShapeCategory> = categories_with_min_cells(FORCED_MIN_CELLS).collect();
        tray.push(self.draw_from(&large));

        let all: Vec<&ShapeCategory> = CATALOG.iter().collect();
        while !tray.is_full() {
            tray.push(self.draw_from(&all));
        }

        self.trays_dealt += 1;
        if self.is_power_up_tray(self.trays_dealt) && TRAY_SIZE > 1 {
            // Slot 0 still holds the forced draw here; the shuffle happens after.
            let slot = 1 + self.rng.next_below(TRAY_SIZE - 1);
            let kind = *self
                .rng
                .choose(&PowerUpKind::ALL)
                .unwrap_or(&PowerUpKind::RowClear);
            let color = self.draw_color();
            tray[slot] = Piece::power_up(self.allocate_id(), kind, color);
        }

        self.rng.shuffle(tray.as_mut_slice());
        tray
    }

    fn draw_from(&mut self, categories: &[&ShapeCategory]) -> Piece {
        let category = pick_weighted(&mut self.rng, categories).unwrap_or(&CATALOG[0]);
        let shape = *self
            .rng
            .choose(category.shapes)
            .unwrap_or(&category.shapes[0]);
        let color = self.draw_color();
        Piece::from_shape(self.allocate_id(), &shape, color)
    }

    fn draw_color(&mut self) -> Color {
        *self.rng.choose(&Color::ALL).unwrap_or(&Color::Red)
    }

    fn allocate_id(&mut self) -> PieceId {
        let id = PieceId(self.next_piece_id);
        self.next_piece_id = self.next_piece_id.wrapping_add(1);
        id
    }
}
