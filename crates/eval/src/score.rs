// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards hand scoring.
//!
//! A [HandScore] is the hand category followed by five tie-break fields, each
//! field a rank value from 2 to 14 or 0 when unused. Scores compare by category
//! first and then field by field, so a derived `Ord` gives poker ordering and
//! `Eq` detects split pots.
use holdem_cards::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{InvalidHandError, check_distinct};

/// A hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 1,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// A straight of the same suit.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandRank {
    /// Returns all categories from the weakest.
    #[cfg(test)]
    fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The category label.
    pub fn label(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A totally ordered hand score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandScore {
    rank: HandRank,
    tiebreak: [u8; 5],
}

impl HandScore {
    /// Creates a score from a category and its tie-break fields.
    pub const fn new(rank: HandRank, tiebreak: [u8; 5]) -> Self {
        Self { rank, tiebreak }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The tie-break fields, most significant first.
    pub fn tiebreak(&self) -> &[u8; 5] {
        &self.tiebreak
    }

    /// The rank stored in a tie-break field.
    pub fn field(&self, idx: usize) -> Option<Rank> {
        self.tiebreak.get(idx).and_then(|v| Rank::from_value(*v))
    }

    /// A description that refines the category, "Kings over Sixes" for a full
    /// house of three kings and two sixes.
    ///
    /// Flushes and royal flushes have no subtype.
    pub fn subtype(&self) -> Option<String> {
        let first = self.field(0);
        match self.rank {
            HandRank::HighCard => first.map(|r| r.name().to_string()),
            HandRank::OnePair | HandRank::ThreeOfAKind | HandRank::FourOfAKind => {
                first.map(|r| r.plural().to_string())
            }
            HandRank::TwoPair => {
                let (high, low) = (first?, self.field(1)?);
                Some(format!("{} and {}", high.plural(), low.plural()))
            }
            HandRank::FullHouse => {
                let (triplet, pair) = (first?, self.field(1)?);
                Some(format!("{} over {}", triplet.plural(), pair.plural()))
            }
            HandRank::Straight | HandRank::StraightFlush => {
                first.map(|r| format!("{} high", r.name()))
            }
            HandRank::Flush | HandRank::RoyalFlush => None,
        }
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subtype() {
            Some(subtype) => write!(f, "{}: {subtype}", self.rank),
            None => write!(f, "{}", self.rank),
        }
    }
}

/// Scores exactly five distinct cards.
///
/// The ace always plays high, A-2-3-4-5 is not a straight.
pub fn score_hand(cards: &[Card]) -> Result<HandScore, InvalidHandError> {
    let cards: &[Card; 5] = cards
        .try_into()
        .map_err(|_| InvalidHandError::Cardinality {
            expected: "5",
            found: cards.len(),
        })?;
    check_distinct(cards)?;

    Ok(score_five(cards))
}

/// Scores five cards already checked for distinctness.
pub(crate) fn score_five(cards: &[Card; 5]) -> HandScore {
    let mut ranks = cards.map(|c| c.rank().value());
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let is_straight = ranks.windows(2).all(|w| w[0] != w[1]) && ranks[0] - ranks[4] == 4;

    if is_flush && is_straight {
        return if ranks[0] == Rank::Ace.value() {
            HandScore::new(HandRank::RoyalFlush, [0; 5])
        } else {
            HandScore::new(HandRank::StraightFlush, [ranks[0], 0, 0, 0, 0])
        };
    }

    // Groups of equal ranks, largest group first and higher rank first.
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for rank in ranks {
        match groups.iter_mut().find(|(_, r)| *r == rank) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, rank)),
        }
    }
    groups.sort_by(|a, b| b.cmp(a));

    let pattern = groups.iter().map(|(count, _)| *count).collect::<Vec<_>>();
    let g = |idx: usize| groups.get(idx).map(|(_, r)| *r).unwrap_or(0);

    match pattern.as_slice() {
        [4, 1] => HandScore::new(HandRank::FourOfAKind, [g(0), g(1), 0, 0, 0]),
        [3, 2] => HandScore::new(HandRank::FullHouse, [g(0), g(1), 0, 0, 0]),
        _ if is_flush => HandScore::new(HandRank::Flush, ranks),
        _ if is_straight => HandScore::new(HandRank::Straight, [ranks[0], 0, 0, 0, 0]),
        [3, 1, 1] => HandScore::new(HandRank::ThreeOfAKind, [g(0), g(1), g(2), 0, 0]),
        [2, 2, 1] => HandScore::new(HandRank::TwoPair, [g(0), g(1), g(2), 0, 0]),
        [2, 1, 1, 1] => HandScore::new(HandRank::OnePair, [g(0), g(1), g(2), g(3), 0]),
        _ => HandScore::new(HandRank::HighCard, ranks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards;
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    fn score(s: &str) -> HandScore {
        score_hand(&cards(s)).unwrap()
    }

    #[test]
    fn categories() {
        let s = score("Ah Kh Qh Jh Th");
        assert_eq!(s.rank(), HandRank::RoyalFlush);
        assert_eq!(s.tiebreak(), &[0; 5]);

        let s = score("9s Ks Qs Js Ts");
        assert_eq!(s, HandScore::new(HandRank::StraightFlush, [13, 0, 0, 0, 0]));

        let s = score("9c 9d 9h 9s 2c");
        assert_eq!(s, HandScore::new(HandRank::FourOfAKind, [9, 2, 0, 0, 0]));

        let s = score("5s 5h 5d Jc Jh");
        assert_eq!(s, HandScore::new(HandRank::FullHouse, [5, 11, 0, 0, 0]));

        let s = score("2c 7c 9c Jc Kc");
        assert_eq!(s, HandScore::new(HandRank::Flush, [13, 11, 9, 7, 2]));

        let s = score("4d 5h 6s 7c 8d");
        assert_eq!(s, HandScore::new(HandRank::Straight, [8, 0, 0, 0, 0]));

        let s = score("3c 3d 3h 9s Kd");
        assert_eq!(s, HandScore::new(HandRank::ThreeOfAKind, [3, 13, 9, 0, 0]));

        let s = score("Js Jh 4c 4d 2s");
        assert_eq!(s, HandScore::new(HandRank::TwoPair, [11, 4, 2, 0, 0]));

        let s = score("Qc Qd 2h 7s 9c");
        assert_eq!(s, HandScore::new(HandRank::OnePair, [12, 9, 7, 2, 0]));

        let s = score("Ac Kd 9h 5s 2c");
        assert_eq!(s, HandScore::new(HandRank::HighCard, [14, 13, 9, 5, 2]));
    }

    #[test]
    fn known_ranking_order() {
        let fixtures = [
            "Ah Kh Qh Jh Th",
            "9c 9d 9h 9s 2c",
            "5s 5h 5d Jc Jh",
            "2c 7c 9c Jc Kc",
            "4d 5h 6s 7c 8d",
            "3c 3d 3h 9s Kd",
            "Js Jh 4c 4d 2s",
            "Qc Qd 2h 7s 9c",
            "Ac Kd 9h 5s 2c",
        ];

        let mut scored = fixtures.iter().rev().map(|h| (score(h), *h)).collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let sorted = scored.iter().map(|(_, h)| *h).collect::<Vec<_>>();
        assert_eq!(sorted, fixtures);
    }

    #[test]
    fn permutation_invariant() {
        let mut rng = StdRng::seed_from_u64(11);
        for hand in ["Js Jh 4c 4d 2s", "2c 7c 9c Jc Kc", "4d 5h 6s 7c 8d", "Ac Kd 9h 5s 2c"] {
            let mut cards = cards(hand);
            let expected = score_hand(&cards).unwrap();
            for _ in 0..20 {
                cards.shuffle(&mut rng);
                assert_eq!(score_hand(&cards).unwrap(), expected);
            }
        }
    }

    #[test]
    fn category_dominates_fields() {
        // Weakest two pair beats the strongest pair.
        assert!(score("2c 2d 3h 3s 4c") > score("Ac Ad Kh Qs Jc"));
        // Weakest straight beats the strongest trips.
        assert!(score("2c 3d 4h 5s 6c") > score("Ac Ad Ah Ks Qc"));
        // Weakest full house beats the strongest flush.
        assert!(score("2c 2d 2h 3s 3c") > score("Ah Kh Qh Jh 9h"));

        for pair in HandRank::ranks().collect::<Vec<_>>().windows(2) {
            let low = HandScore::new(pair[0], [14; 5]);
            let high = HandScore::new(pair[1], [0; 5]);
            assert!(high > low);
        }
    }

    #[test]
    fn kickers_break_ties() {
        assert!(score("Kc Kd Jh Ts 8c") > score("Kh Ks Jc Td 6c"));
        assert!(score("Jc Jd 8h 8s Ac") > score("Jh Js 8c 8d Kc"));
        assert!(score("5c 5d 5h Qs Qc") > score("4c 4d 4h As Ac"));
        assert_eq!(score("Kc Kd Qh Js Tc"), score("Kh Ks Qc Jd Th"));
    }

    #[test]
    fn no_wheel_straight() {
        let s = score("Ac 2d 3h 4s 5c");
        assert_eq!(s.rank(), HandRank::HighCard);
        assert_eq!(s.tiebreak(), &[14, 5, 4, 3, 2]);

        let s = score("Ah 2h 3h 4h 5h");
        assert_eq!(s.rank(), HandRank::Flush);
    }

    #[test]
    fn invalid_hands() {
        assert_eq!(
            score_hand(&cards("Ac Kd 9h 5s")),
            Err(InvalidHandError::Cardinality {
                expected: "5",
                found: 4
            })
        );
        assert!(matches!(
            score_hand(&cards("Ac Kd 9h 5s 2c 3c")),
            Err(InvalidHandError::Cardinality { found: 6, .. })
        ));
        assert_eq!(
            score_hand(&cards("Ac Kd 9h Ac 2c")),
            Err(InvalidHandError::Duplicate("Ac".parse().unwrap()))
        );
    }

    #[test]
    fn subtypes() {
        assert_eq!(score("Kc Kd Kh 6s 6c").subtype().as_deref(), Some("Kings over Sixes"));
        assert_eq!(score("Jc Jd 6h 6s Ac").subtype().as_deref(), Some("Jacks and Sixes"));
        assert_eq!(score("6c 6d 2h 8s Ac").subtype().as_deref(), Some("Sixes"));
        assert_eq!(score("Qc Qd Qh 8s Ac").subtype().as_deref(), Some("Queens"));
        assert_eq!(score("9c 9d 9h 9s Ac").subtype().as_deref(), Some("Nines"));
        assert_eq!(score("4d 5h 6s 7c 8d").subtype().as_deref(), Some("Eight high"));
        assert_eq!(score("9s Ks Qs Js Ts").subtype().as_deref(), Some("King high"));
        assert_eq!(score("Ac Kd 9h 5s 2c").subtype().as_deref(), Some("Ace"));
        assert_eq!(score("2c 7c 9c Jc Kc").subtype(), None);
        assert_eq!(score("Ah Kh Qh Jh Th").subtype(), None);
    }

    #[test]
    fn score_display() {
        assert_eq!(score("Kc Kd Kh 6s 6c").to_string(), "Full House: Kings over Sixes");
        assert_eq!(score("2c 7c 9c Jc Kc").to_string(), "Flush");
    }
}
