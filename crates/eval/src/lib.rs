// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem hand evaluator.
//!
//! Scores five cards hands, picks the best five cards out of a player hole
//! cards and the board, and finds showdown winners with their kicker cards.
//!
//! To compare two hands score them with [score_hand], a higher [HandScore]
//! wins and equal scores split:
//!
//! ```
//! # use holdem_eval::*;
//! let cards = |s: &str| s.split(' ').map(|c| c.parse::<Card>().unwrap()).collect::<Vec<_>>();
//! let flush = score_hand(&cards("2c 7c 9c Jc Kc")).unwrap();
//! let straight = score_hand(&cards("4d 5h 6s 7c 8d")).unwrap();
//! assert!(flush > straight);
//! assert_eq!(flush.rank(), HandRank::Flush);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod best;
mod error;
mod score;
mod showdown;

pub use best::{BestHand, best_hand, select_best_hand};
pub use error::InvalidHandError;
pub use score::{HandRank, HandScore, score_hand};
pub use showdown::{Showdown, ShowdownHand, determine_showdown_winners};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, Rank, Suit};

#[cfg(test)]
pub(crate) fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}
