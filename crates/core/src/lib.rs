// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem core types: chips, players, pots and the fixed limit table.
//!
//! The [Table] takes the players bets and at the end of each street moves them
//! into the [PotLedger] pots, opening side pots when players went all-in:
//!
//! ```
//! # use holdem_core::*;
//! let mut players = (0..3)
//!     .map(|seat| Player::new(PlayerId::new(seat), format!("P{seat}"), Chips::new(300)))
//!     .collect::<Vec<_>>();
//! players[0].chips = Chips::new(100);
//!
//! let mut table = Table::new(Chips::new(20));
//! table.reset(players.iter().map(|p| p.id));
//! table.take_bet(&mut players[0], BettingMove::AllIn).unwrap();
//! table.take_bet(&mut players[1], BettingMove::Call).unwrap();
//! table.take_bet(&mut players[2], BettingMove::AllIn).unwrap();
//! table.take_bet(&mut players[1], BettingMove::Fold).unwrap();
//! table.settle_street(&mut players).unwrap();
//!
//! let pots = table.ledger().pots();
//! assert_eq!(pots[0].amount(), Chips::new(300));
//! assert_eq!(pots[1].amount(), Chips::new(200));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod action;
pub mod chips;
pub mod error;
pub mod ledger;
pub mod player;
pub mod table;

pub use action::{BettingMove, MAX_RAISES, Situation, Spot, Street};
pub use chips::Chips;
pub use error::LedgerError;
pub use ledger::{Participant, Payout, Pot, PotLedger};
pub use player::{Player, PlayerId};
pub use table::{BLIND_INCREASE_HANDS, Table};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, Rank, Suit};
