// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting and pots errors.
use thiserror::Error;

use crate::{chips::Chips, player::PlayerId};

/// An inconsistent pots or bets update.
///
/// These are caller bugs, a game that gets one of these cannot continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A player contributed twice in the same street.
    #[error("player {0} already contributed this street")]
    DuplicateContribution(PlayerId),
    /// A folded player went all-in.
    #[error("player {0} has folded")]
    FoldedContribution(PlayerId),
    /// Street settled without players.
    #[error("cannot settle a street without active players")]
    NoActivePlayers,
    /// Pot index out of range.
    #[error("no pot at index {0}")]
    BadPotIndex(usize),
    /// The pot was already awarded.
    #[error("pot {0} already awarded")]
    AlreadyAwarded(usize),
    /// A pot awarded to nobody.
    #[error("pot {0} awarded without winners")]
    NoWinners(usize),
    /// A player tried to lower its bet.
    #[error("player {player} cannot match {amount} having bet {bet}")]
    BetTooLow {
        /// The betting player.
        player: PlayerId,
        /// The amount to match.
        amount: Chips,
        /// The player current bet.
        bet: Chips,
    },
    /// A player bet more than its stack.
    #[error("player {player} cannot match {amount} with {chips} chips")]
    NotEnoughChips {
        /// The betting player.
        player: PlayerId,
        /// The amount to match.
        amount: Chips,
        /// The player stack.
        chips: Chips,
    },
}
