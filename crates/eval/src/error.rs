// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluator errors.
use holdem_cards::Card;
use thiserror::Error;

/// A malformed hand was given to the evaluator.
///
/// This signals a corrupted deal and is not recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidHandError {
    /// Wrong number of cards.
    #[error("expected {expected} cards, found {found}")]
    Cardinality {
        /// The accepted number of cards.
        expected: &'static str,
        /// The number of cards given.
        found: usize,
    },
    /// The same card appears more than once.
    #[error("duplicate card {0}")]
    Duplicate(Card),
}

/// Checks that `cards` has no duplicates.
pub(crate) fn check_distinct(cards: &[Card]) -> Result<(), InvalidHandError> {
    for (idx, card) in cards.iter().enumerate() {
        if cards[idx + 1..].contains(card) {
            return Err(InvalidHandError::Duplicate(*card));
        }
    }

    Ok(())
}
