// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "Kd".parse().unwrap();
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! and a [Deck] type for shuffling and dealing cards:
//!
//! ```
//! # use holdem_cards::Deck;
//! # use rand::{SeedableRng, rngs::StdRng};
//! let mut deck = Deck::default();
//! deck.shuffle(&mut StdRng::seed_from_u64(1));
//! deck.burn();
//! let flop = (0..3).filter_map(|_| deck.deal()).collect::<Vec<_>>();
//! assert_eq!(flop.len(), 3);
//! assert_eq!(deck.len(), Deck::SIZE - 4);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};
