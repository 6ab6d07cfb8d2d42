// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem computer players.
//!
//! A computer player picks its move from the betting [Spot] and a random roll,
//! each [Personality] maps the roll to moves with different probabilities:
//!
//! ```
//! # use holdem_bot::*;
//! # use holdem_core::{BettingMove, Chips, Spot};
//! let spot = Spot {
//!     chips: Chips::new(500),
//!     bet: Chips::ZERO,
//!     raise_amount: Chips::new(20),
//!     times_raised: 0,
//!     last_bet: Chips::ZERO,
//! };
//! assert_eq!(Safe.execute(&spot, 0.5), BettingMove::Check);
//! assert_eq!(Risky.execute(&spot, 0.5), BettingMove::Bet);
//! ```
//!
//! [Spot]: holdem_core::Spot
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod strategy;
pub use strategy::{Personality, Risky, Safe, Strategy, Wild};
