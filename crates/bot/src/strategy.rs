// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Computer players betting strategies.
use log::trace;
use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use std::fmt;

use holdem_core::{BettingMove, Situation, Spot};

/// A computer player betting strategy.
pub trait Strategy {
    /// Picks a move for the given spot, `roll` is a uniform random value in [0, 1).
    fn execute(&self, spot: &Spot, roll: f64) -> BettingMove;
}

/// Cumulative probabilities for each group of moves.
#[derive(Debug, Clone, Copy)]
struct Thresholds {
    /// All-in when the stack cannot cover the bet.
    cannot_call_all_in: f64,
    /// Check or call when the stack cannot cover a raise.
    short_call: f64,
    /// All-in when the stack cannot cover a raise.
    short_all_in: f64,
    /// Check or call.
    passive: f64,
    /// Bet or raise.
    aggressive: f64,
    /// Call when no more raises are allowed.
    capped_call: f64,
}

impl Thresholds {
    fn play(&self, spot: &Spot, roll: f64) -> BettingMove {
        let mv = match spot.situation() {
            Situation::CannotCall if roll <= self.cannot_call_all_in => BettingMove::AllIn,
            Situation::CannotCall => BettingMove::Fold,
            Situation::ShortCanCall if roll <= self.short_call => spot.passive_move(),
            Situation::ShortCanCall if roll <= self.short_all_in => BettingMove::AllIn,
            Situation::ShortCanCall => BettingMove::Fold,
            Situation::Unopened if roll <= self.passive => BettingMove::Check,
            Situation::Unopened if roll <= self.aggressive => BettingMove::Bet,
            Situation::FacingBet if roll <= self.passive => BettingMove::Call,
            Situation::FacingBet if roll <= self.aggressive => BettingMove::Raise,
            Situation::Unopened | Situation::FacingBet => BettingMove::Fold,
            Situation::Capped if roll <= self.capped_call => BettingMove::Call,
            Situation::Capped => BettingMove::Fold,
        };

        trace!("{:?} roll {roll:.2} -> {mv}", spot.situation());
        mv
    }
}

/// Calls often, bets and raises sometimes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Safe;

impl Safe {
    const THRESHOLDS: Thresholds = Thresholds {
        cannot_call_all_in: 0.60,
        short_call: 0.60,
        short_all_in: 0.80,
        passive: 0.70,
        aggressive: 0.90,
        capped_call: 0.90,
    };
}

impl Strategy for Safe {
    fn execute(&self, spot: &Spot, roll: f64) -> BettingMove {
        Self::THRESHOLDS.play(spot, roll)
    }
}

/// Bets and raises more than it calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Risky;

impl Risky {
    const THRESHOLDS: Thresholds = Thresholds {
        cannot_call_all_in: 0.90,
        short_call: 0.40,
        short_all_in: 0.90,
        passive: 0.40,
        aggressive: 0.90,
        capped_call: 0.90,
    };
}

impl Strategy for Risky {
    fn execute(&self, spot: &Spot, roll: f64) -> BettingMove {
        Self::THRESHOLDS.play(spot, roll)
    }
}

/// Plays at random, folds a third of the time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wild;

impl Wild {
    const THRESHOLDS: Thresholds = Thresholds {
        cannot_call_all_in: 0.50,
        short_call: 0.30,
        short_all_in: 0.66,
        passive: 0.33,
        aggressive: 0.66,
        capped_call: 0.66,
    };
}

impl Strategy for Wild {
    fn execute(&self, spot: &Spot, roll: f64) -> BettingMove {
        Self::THRESHOLDS.play(spot, roll)
    }
}

/// A computer player personality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    /// See [Safe].
    Safe,
    /// See [Risky].
    Risky,
    /// See [Wild].
    Wild,
}

impl Personality {
    /// All personalities.
    pub const ALL: [Personality; 3] = [Personality::Safe, Personality::Risky, Personality::Wild];

    /// Picks a personality at random.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Personality::Safe)
    }

    /// The strategy for this personality.
    pub fn strategy(&self) -> &'static dyn Strategy {
        match self {
            Personality::Safe => &Safe,
            Personality::Risky => &Risky,
            Personality::Wild => &Wild,
        }
    }
}

impl Strategy for Personality {
    fn execute(&self, spot: &Spot, roll: f64) -> BettingMove {
        self.strategy().execute(spot, roll)
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Personality::Safe => "safe",
            Personality::Risky => "risky",
            Personality::Wild => "wild",
        };

        f.write_str(s)
    }
}
