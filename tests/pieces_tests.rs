//! Tray generator tests through the facade

use std::collections::HashSet;

use chroma_blast::core::generator::FORCED_MIN_CELLS;
use chroma_blast::core::{PieceGenerator, RngMode};
use chroma_blast::engine::GameEngine;
use chroma_blast::types::{BoardSize, Position, RulesConfig, TRAY_SIZE};

// ============== Engine trays ==============

#[test]
fn test_engine_tray_pieces_land_where_previewed() {
    let mut engine = GameEngine::default();
    engine.start(BoardSize::Ten, RngMode::Seeded(31));

    let (id, origin) = engine.hint().unwrap();
    let piece = engine.tray_piece(id).unwrap().clone();
    let expected: Vec<Position> = piece.cells_at(origin).collect();

    engine.place_piece(id, origin).unwrap();
    for pos in expected {
        assert_eq!(engine.board().block_at(pos).map(|b| b.color), Some(piece.color));
    }
    assert!(engine.tray_piece(id).is_none());
}

#[test]
fn test_engine_deals_generator_stream() {
    let rules = RulesConfig::default();
    let mut engine = GameEngine::new(rules);
    engine.start(BoardSize::Nine, RngMode::daily("2026-02-11"));

    let mut generator = PieceGenerator::new(RngMode::daily("2026-02-11"), &rules);
    assert_eq!(engine.tray(), generator.next_tray().as_slice());
}

// ============== Generator ==============

#[test]
fn test_every_tray_has_a_large_piece() {
    let rules = RulesConfig::default();
    let mut generator = PieceGenerator::new(RngMode::Seeded(99), &rules);
    for _ in 0..200 {
        let tray = generator.next_tray();
        assert_eq!(tray.len(), TRAY_SIZE);
        assert!(tray
            .iter()
            .any(|p| !p.is_power_up() && p.cell_count() >= FORCED_MIN_CELLS));
    }
}

#[test]
fn test_power_up_cadence() {
    let rules = RulesConfig::default();
    let mut generator = PieceGenerator::new(RngMode::Seeded(5), &rules);
    for n in 1..=30u32 {
        let tray = generator.next_tray();
        let power_ups = tray.iter().filter(|p| p.is_power_up()).count();
        let expected = if n >= 3 && (n - 3) % 3 == 0 { 1 } else { 0 };
        assert_eq!(power_ups, expected, "tray {}", n);
        for p in tray.iter().filter(|p| p.is_power_up()) {
            assert_eq!(p.cell_count(), 1);
        }
    }
}

#[test]
fn test_piece_ids_unique_across_trays() {
    let mut generator = PieceGenerator::new(RngMode::Random, &RulesConfig::default());
    let mut ids = HashSet::new();
    for _ in 0..50 {
        for piece in generator.next_tray() {
            assert!(ids.insert(piece.id));
        }
    }
}

#[test]
fn test_daily_seed_trays_match() {
    let rules = RulesConfig::default();
    let mut a = PieceGenerator::new(RngMode::daily("2026-02-11"), &rules);
    let mut b = PieceGenerator::new(RngMode::daily("2026-02-11"), &rules);
    let mut c = PieceGenerator::new(RngMode::daily("2026-02-12"), &rules);

    let ta: Vec<_> = (0..3).map(|_| a.next_tray()).collect();
    let tb: Vec<_> = (0..3).map(|_| b.next_tray()).collect();
    let tc: Vec<_> = (0..3).map(|_| c.next_tray()).collect();
    assert_eq!(ta, tb);
    assert_ne!(ta, tc);
}
