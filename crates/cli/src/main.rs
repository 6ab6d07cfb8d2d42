// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem terminal game.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};

use holdem_core::{Chips, PlayerId};

pub mod game;
pub mod terminal;

use game::{Game, GameConfig};

#[derive(Debug, Parser)]
struct Cli {
    /// Your player name.
    #[clap(long, short)]
    name: String,
    /// Number of computer players.
    #[clap(long, short, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    computers: u8,
    /// Starting chips for each player.
    #[clap(long, short = 's', default_value_t = 1_000, value_parser = clap::value_parser!(u32).range(100..=999_999))]
    chips: u32,
    /// The starting big blind, between chips/50 and chips/10 [default: chips/50].
    #[clap(long, short)]
    big_blind: Option<u32>,
    /// Seed for a reproducible game.
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let chips = Chips::new(self.chips);
        GameConfig {
            name: self.name.clone(),
            computers: self.computers,
            chips,
            big_blind: self
                .big_blind
                .map(Chips::new)
                .unwrap_or_else(|| GameConfig::min_big_blind(chips)),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut game = Game::new(&cli.config(), rng)?;
    let mut term = terminal::Terminal::stdio(PlayerId::new(0));
    if let Err(e) = game.play(&mut term) {
        error!("Game error: {e}");
        return Err(e);
    }

    info!(
        "Game over after {} hands, {} players left, {} chips lost to uneven splits",
        game.table().hands_played,
        game.players().iter().filter(|p| p.is_in_game).count(),
        game.discarded()
    );

    Ok(())
}
