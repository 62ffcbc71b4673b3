//! Headless runner: argument parsing, rules loading and the autoplay loop.
//!
//! The binary is a thin wrapper over [`parse_args`] and [`run`]; keeping them here lets
//! the integration tests drive the same code paths.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{Piece, PieceGenerator, RngMode};
use crate::engine::GameEngine;
use crate::types::{BoardSize, GamePhase, RulesConfig};
use crate::{log, vlog};

/// Default number of placements before the runner stops.
pub const DEFAULT_MOVES: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedChoice {
    Random,
    Seed(u64),
    /// `None` means today's local date.
    Daily(Option<NaiveDate>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub size: BoardSize,
    pub seed: SeedChoice,
    pub rules_path: Option<PathBuf>,
    pub moves: u32,
    /// Print this many trays and exit without playing.
    pub trays: Option<u32>,
    pub json: bool,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            size: BoardSize::default(),
            seed: SeedChoice::Random,
            rules_path: None,
            moves: DEFAULT_MOVES,
            trays: None,
            json: false,
            verbose: false,
        }
    }
}

impl RunConfig {
    pub fn rng_mode(&self) -> RngMode {
        match &self.seed {
            SeedChoice::Random => RngMode::Random,
            SeedChoice::Seed(seed) => RngMode::Seeded(*seed),
            SeedChoice::Daily(Some(date)) => {
                RngMode::Seeded(crate::core::rng::daily_seed(*date))
            }
            SeedChoice::Daily(None) => RngMode::daily_today(),
        }
    }
}

fn parse_date(v: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid --daily date (expected yyyy-MM-dd): {}", v))
}

/// Parse arguments (program name already stripped).
pub fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--size" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --size"))?;
                let edge = v
                    .parse::<u8>()
                    .map_err(|_| anyhow!("invalid --size value: {}", v))?;
                config.size = BoardSize::from_edge(edge)
                    .ok_or_else(|| anyhow!("unsupported board size: {} (use 8, 9, 10 or 12)", edge))?;
            }
            "--seed" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                config.seed = SeedChoice::Seed(seed);
            }
            "--daily" => {
                // Optional value: only consume the next arg if it is not another flag.
                let date = match args.get(i + 1) {
                    Some(v) if !v.starts_with("--") => {
                        i += 1;
                        Some(parse_date(v)?)
                    }
                    _ => None,
                };
                config.seed = SeedChoice::Daily(date);
            }
            "--rules" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --rules"))?;
                config.rules_path = Some(PathBuf::from(v));
            }
            "--moves" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --moves"))?;
                config.moves = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --moves value: {}", v))?;
            }
            "--trays" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --trays"))?;
                config.trays = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --trays value: {}", v))?,
                );
            }
            "--json" => config.json = true,
            "--verbose" | "-v" => config.verbose = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(config)
}

/// Parse a rules document. Missing fields keep their defaults.
pub fn parse_rules(json: &str) -> Result<RulesConfig> {
    let rules: RulesConfig = serde_json::from_str(json).context("invalid rules JSON")?;
    if rules.power_up_interval == 0 {
        return Err(anyhow!("rules: power_up_interval must be at least 1"));
    }
    Ok(rules)
}

pub fn load_rules(config: &RunConfig) -> Result<RulesConfig> {
    let Some(path) = &config.rules_path else {
        return Ok(RulesConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    let rules = parse_rules(&text)?;
    log!("Rules", "loaded {}", path.display());
    Ok(rules)
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub size: BoardSize,
    pub deterministic: bool,
    pub phase: GamePhase,
    pub score: u32,
    pub moves: u32,
    pub pieces_placed: u32,
    pub blast_count: u32,
    pub max_combo: u32,
    pub trays_dealt: u32,
    pub continue_used: bool,
    pub min_group_size: u32,
    pub board_hash: u64,
}

/// Play up to `config.moves` turns, always taking the first valid placement.
///
/// On game over the continue bomb is tried once at the board center.
pub fn autoplay(engine: &mut GameEngine, moves: u32) -> u32 {
    let mut played = 0;
    while played < moves {
        if engine.phase() == GamePhase::GameOver {
            let edge = engine.board_size().edge() as i8;
            let center = crate::types::Position::new(edge / 2, edge / 2);
            match engine.use_bomb(center) {
                Ok(bomb) => {
                    log!("Engine", "continue bomb cleared {} cells", bomb.cleared.len());
                    if !bomb.resumed {
                        break;
                    }
                }
                Err(_) => break,
            }
        }

        let Some((id, origin)) = engine.hint() else {
            break;
        };
        let is_power_up = engine.tray_piece(id).is_some_and(Piece::is_power_up);
        let result = if is_power_up {
            engine.activate_power_up(id, origin)
        } else {
            engine.place_piece(id, origin)
        };

        match result {
            Ok(outcome) => {
                played += 1;
                vlog!(
                    "Engine",
                    "move {}: piece {} at ({}, {}) +{} points, {} blasts",
                    played,
                    id.0,
                    origin.row,
                    origin.col,
                    outcome.points,
                    outcome.combo
                );
            }
            Err(e) => {
                log!("Engine", "hint rejected: {}", e);
                break;
            }
        }
    }
    played
}

pub fn summarize(engine: &GameEngine, moves: u32) -> RunSummary {
    let snapshot = engine.snapshot();
    RunSummary {
        size: engine.board_size(),
        deterministic: snapshot.deterministic,
        phase: snapshot.phase,
        score: snapshot.score,
        moves,
        pieces_placed: snapshot.pieces_placed,
        blast_count: snapshot.blast_count,
        max_combo: snapshot.max_combo,
        trays_dealt: snapshot.trays_dealt,
        continue_used: snapshot.continue_used,
        min_group_size: snapshot.min_group_size,
        board_hash: snapshot.board.board_hash,
    }
}

/// One dealt tray in the `--trays` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayListing {
    pub tray: u32,
    pub pieces: Vec<Piece>,
}

pub fn deal_trays(mode: RngMode, rules: &RulesConfig, count: u32) -> Vec<TrayListing> {
    let mut generator = PieceGenerator::new(mode, rules);
    (1..=count)
        .map(|n| TrayListing {
            tray: n,
            pieces: generator.next_tray().to_vec(),
        })
        .collect()
}

fn describe_piece(piece: &Piece) -> String {
    match piece.power_up {
        Some(kind) => format!("{}({})", kind.as_str(), piece.color.as_str()),
        None => format!("{}({})", piece.shape, piece.color.as_str()),
    }
}

/// Render output for `config`. Returns the text printed to stdout.
pub fn run(config: &RunConfig) -> Result<String> {
    let rules = load_rules(config)?;
    let mode = config.rng_mode();

    if let Some(count) = config.trays {
        let listing = deal_trays(mode, &rules, count);
        if config.json {
            return Ok(serde_json::to_string_pretty(&listing)?);
        }
        let lines: Vec<String> = listing
            .iter()
            .map(|t| {
                let pieces: Vec<String> = t.pieces.iter().map(describe_piece).collect();
                format!("tray {}: {}", t.tray, pieces.join(" "))
            })
            .collect();
        return Ok(lines.join("\n"));
    }

    let mut engine = GameEngine::new(rules);
    engine.start(config.size, mode);
    log!(
        "Engine",
        "started {}x{} ({})",
        config.size.edge(),
        config.size.edge(),
        if mode.is_deterministic() { "seeded" } else { "random" }
    );

    let played = autoplay(&mut engine, config.moves);
    let summary = summarize(&engine, played);

    if config.json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    let mut out = String::new();
    for row in engine.snapshot().board.cells {
        let line: String = row
            .iter()
            .map(|c| c.map_or('.', |c| c.as_str().chars().next().unwrap_or('?')))
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!(
        "phase={:?} score={} moves={} blasts={} max_combo={} min_group={}",
        summary.phase,
        summary.score,
        summary.moves,
        summary.blast_count,
        summary.max_combo,
        summary.min_group_size
    ));
    Ok(out)
}
