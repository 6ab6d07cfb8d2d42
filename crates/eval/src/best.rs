// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best five cards hand selection.
use holdem_cards::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::{InvalidHandError, check_distinct},
    score::{HandRank, HandScore, score_five},
};

/// The highest scoring five cards taken from a player cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestHand {
    cards: [Card; 5],
    score: HandScore,
}

impl BestHand {
    fn new(mut cards: [Card; 5], score: HandScore) -> Self {
        cards.sort_by(|a, b| b.rank().cmp(&a.rank()));
        Self { cards, score }
    }

    /// The hand cards sorted from the highest rank.
    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }

    /// The hand score.
    pub fn score(&self) -> HandScore {
        self.score
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.score.rank()
    }

    /// The hand category label.
    pub fn label(&self) -> &'static str {
        self.score.rank().label()
    }

    /// See [HandScore::subtype].
    pub fn subtype(&self) -> Option<String> {
        self.score.subtype()
    }

    /// The first card in the hand with the given rank.
    pub fn card_with_rank(&self, rank: Rank) -> Option<Card> {
        self.cards.iter().find(|c| c.rank() == rank).copied()
    }
}

impl fmt::Display for BestHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }

        write!(f, " ({})", self.score)
    }
}

/// Picks the best hand from two hole cards and the five community cards.
pub fn select_best_hand(hole: &[Card; 2], community: &[Card; 5]) -> Result<BestHand, InvalidHandError> {
    let mut cards = [hole[0]; 7];
    cards[1] = hole[1];
    cards[2..].copy_from_slice(community);
    best_hand(&cards)
}

/// Picks the best five cards hand from 5 to 7 distinct cards.
///
/// All 5 cards combinations are scored, when two combinations have the same
/// score the first one found is kept.
pub fn best_hand(cards: &[Card]) -> Result<BestHand, InvalidHandError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(InvalidHandError::Cardinality {
            expected: "5 to 7",
            found: n,
        });
    }

    check_distinct(cards)?;

    let mut best: Option<BestHand> = None;
    for c1 in 0..n {
        for c2 in (c1 + 1)..n {
            for c3 in (c2 + 1)..n {
                for c4 in (c3 + 1)..n {
                    for c5 in (c4 + 1)..n {
                        let hand = [cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]];
                        let score = score_five(&hand);
                        if best.is_none_or(|b| score > b.score) {
                            best = Some(BestHand::new(hand, score));
                        }
                    }
                }
            }
        }
    }

    best.ok_or(InvalidHandError::Cardinality {
        expected: "5 to 7",
        found: n,
    })
}
