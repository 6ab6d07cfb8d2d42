// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown winners and kicker detection.
use holdem_cards::{Card, Rank};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    best::{BestHand, select_best_hand},
    error::InvalidHandError,
    score::HandRank,
};

/// A contender hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownHand<K> {
    /// The contender key.
    pub player: K,
    /// The contender best hand.
    pub best: BestHand,
    /// The hand subtype, see [crate::HandScore::subtype].
    pub subtype: Option<String>,
    /// The card that broke a tie with other contenders, only for winners.
    pub kicker: Option<Card>,
    /// Whether this hand wins or splits the pot.
    pub is_winner: bool,
}

/// The result of a showdown, hands are in contenders order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showdown<K> {
    hands: Vec<ShowdownHand<K>>,
}

impl<K: Copy + PartialEq> Showdown<K> {
    /// All contenders hands.
    pub fn hands(&self) -> &[ShowdownHand<K>] {
        &self.hands
    }

    /// The hand for a contender.
    pub fn hand(&self, player: K) -> Option<&ShowdownHand<K>> {
        self.hands.iter().find(|h| h.player == player)
    }

    /// The winners keys, more than one for a split pot.
    pub fn winners(&self) -> Vec<K> {
        self.hands
            .iter()
            .filter(|h| h.is_winner)
            .map(|h| h.player)
            .collect()
    }

    /// The winners hands.
    pub fn winning_hands(&self) -> impl Iterator<Item = &ShowdownHand<K>> {
        self.hands.iter().filter(|h| h.is_winner)
    }

    /// Checks if the pot is split.
    pub fn is_split(&self) -> bool {
        self.winning_hands().count() > 1
    }
}

/// Finds the contenders with the best hand given the community cards.
///
/// Every winner gets a kicker card when its hand beats a contender with the
/// same category and primary ranks only by a kicker rank.
pub fn determine_showdown_winners<K>(
    contenders: &[(K, [Card; 2])],
    community: &[Card; 5],
) -> Result<Showdown<K>, InvalidHandError>
where
    K: Copy + PartialEq,
{
    let mut hands = contenders
        .iter()
        .map(|(player, hole)| {
            let best = select_best_hand(hole, community)?;
            Ok(ShowdownHand {
                player: *player,
                subtype: best.subtype(),
                best,
                kicker: None,
                is_winner: false,
            })
        })
        .collect::<Result<Vec<_>, InvalidHandError>>()?;

    if let Some(top) = hands.iter().map(|h| h.best.score()).max() {
        for hand in hands.iter_mut() {
            hand.is_winner = hand.best.score() == top;
        }
    }

    assign_kicker(&mut hands);

    let showdown = Showdown { hands };
    debug!(
        "Showdown {} contenders {} winners",
        showdown.hands.len(),
        showdown.winning_hands().count()
    );

    Ok(showdown)
}

/// Sets the kicker card for the winning hands.
///
/// Contenders tied with the winners on category and primary fields are
/// compared on the remaining fields, the first field where they differ gives
/// the kicker rank.
fn assign_kicker<K>(hands: &mut [ShowdownHand<K>]) {
    let Some(top) = hands.iter().find(|h| h.is_winner).map(|h| h.best.score()) else {
        return;
    };

    let (primary, fields) = match top.rank() {
        HandRank::HighCard
        | HandRank::OnePair
        | HandRank::ThreeOfAKind
        | HandRank::FourOfAKind => (1, 1..5),
        HandRank::TwoPair => (2, 2..3),
        HandRank::Flush => (0, 0..5),
        _ => return,
    };

    let tied = hands
        .iter()
        .map(|h| h.best.score())
        .filter(|s| s.rank() == top.rank() && s.tiebreak()[..primary] == top.tiebreak()[..primary])
        .collect::<Vec<_>>();

    if tied.len() < 2 {
        return;
    }

    let kicker = fields.into_iter().find_map(|idx| {
        let max = tied.iter().map(|s| s.tiebreak()[idx]).max()?;
        if tied.iter().all(|s| s.tiebreak()[idx] == max) {
            None
        } else {
            Rank::from_value(max)
        }
    });

    if let Some(rank) = kicker {
        for hand in hands.iter_mut().filter(|h| h.is_winner) {
            hand.kicker = hand.best.card_with_rank(rank);
        }
    }
}
