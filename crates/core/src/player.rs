// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use holdem_cards::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{chips::Chips, error::LedgerError, ledger::Participant};

/// A player identifier, the player seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Creates an id for the given seat.
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// The player seat index.
    pub fn seat(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A table player state.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player id.
    pub id: PlayerId,
    /// The player name.
    pub name: String,
    /// The chips not yet bet.
    pub chips: Chips,
    /// The chips bet this street.
    pub bet: Chips,
    /// This player hole cards, empty before the deal.
    pub hole_cards: Vec<Card>,
    /// The player has the dealer button.
    pub is_dealer: bool,
    /// The player posts the small blind.
    pub is_sb: bool,
    /// The player posts the big blind.
    pub is_bb: bool,
    /// The player folded this hand.
    pub is_folded: bool,
    /// The player has acted since the last bet or raise.
    pub is_locked: bool,
    /// The player has bet all its chips.
    pub is_all_in: bool,
    /// The player still has chips to play.
    pub is_in_game: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(id: PlayerId, name: impl Into<String>, chips: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            bet: Chips::ZERO,
            hole_cards: Vec::with_capacity(2),
            is_dealer: false,
            is_sb: false,
            is_bb: false,
            is_folded: false,
            is_locked: false,
            is_all_in: false,
            is_in_game: true,
        }
    }

    /// Reset state for a new hand.
    pub fn reset(&mut self) {
        self.bet = Chips::ZERO;
        self.hole_cards.clear();
        self.is_dealer = false;
        self.is_sb = false;
        self.is_bb = false;
        self.is_folded = false;
        self.is_locked = false;
        self.is_all_in = false;
    }

    /// Raises this player street bet to `amount`.
    pub fn match_bet(&mut self, amount: Chips) -> Result<Chips, LedgerError> {
        if amount < self.bet {
            return Err(LedgerError::BetTooLow {
                player: self.id,
                amount,
                bet: self.bet,
            });
        }

        let remainder = amount - self.bet;
        if remainder > self.chips {
            return Err(LedgerError::NotEnoughChips {
                player: self.id,
                amount,
                chips: self.chips,
            });
        }

        self.chips -= remainder;
        self.bet = amount;
        Ok(self.bet)
    }

    /// Moves all the player chips into the bet.
    pub fn go_all_in(&mut self) {
        self.bet += self.chips;
        self.chips = Chips::ZERO;
        self.is_all_in = true;
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.is_folded = true;
    }

    /// Gives a hole card to this player.
    pub fn deal(&mut self, card: Card) {
        self.hole_cards.push(card);
    }

    /// The two hole cards, if dealt.
    pub fn hole(&self) -> Option<[Card; 2]> {
        match self.hole_cards.as_slice() {
            [c1, c2] => Some([*c1, *c2]),
            _ => None,
        }
    }

    /// Adds chips won to the stack.
    pub fn credit(&mut self, chips: Chips) {
        self.chips += chips;
    }

    /// Checks if this player can still act in the hand.
    pub fn can_bet(&self) -> bool {
        self.is_in_game && !self.is_folded && !self.is_all_in
    }
}

impl Participant for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn is_folded(&self) -> bool {
        self.is_folded
    }

    fn is_all_in(&self) -> bool {
        self.is_all_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(chips: u32) -> Player {
        Player::new(PlayerId::new(0), "Alice", Chips::new(chips))
    }

    #[test]
    fn match_bet_moves_chips() {
        let mut p = player(1_000);
        assert_eq!(p.match_bet(Chips::new(50)), Ok(Chips::new(50)));
        assert_eq!(p.match_bet(Chips::new(150)), Ok(Chips::new(150)));
        assert_eq!(p.chips, Chips::new(850));
        assert_eq!(p.bet, Chips::new(150));

        // Matching the current bet is a check.
        assert_eq!(p.match_bet(Chips::new(150)), Ok(Chips::new(150)));
        assert_eq!(p.chips, Chips::new(850));
    }

    #[test]
    fn illegal_bets() {
        let mut p = player(100);
        p.match_bet(Chips::new(60)).unwrap();

        assert!(matches!(
            p.match_bet(Chips::new(20)),
            Err(LedgerError::BetTooLow { .. })
        ));
        assert!(matches!(
            p.match_bet(Chips::new(101)),
            Err(LedgerError::NotEnoughChips { .. })
        ));

        // Failed bets leave the player untouched.
        assert_eq!(p.chips, Chips::new(40));
        assert_eq!(p.bet, Chips::new(60));

        // A bet of the whole stack is legal.
        assert_eq!(p.match_bet(Chips::new(100)), Ok(Chips::new(100)));
        assert!(p.chips.is_zero());
    }

    #[test]
    fn all_in_fold_and_reset() {
        let mut p = player(300);
        p.match_bet(Chips::new(100)).unwrap();
        p.go_all_in();
        assert_eq!(p.bet, Chips::new(300));
        assert!(p.chips.is_zero());
        assert!(p.is_all_in);
        assert!(!p.can_bet());

        p.deal("Ah".parse().unwrap());
        assert_eq!(p.hole(), None);
        p.deal("Kd".parse().unwrap());
        assert!(p.hole().is_some());

        p.fold();
        assert!(p.is_folded);

        p.reset();
        assert!(!p.is_folded && !p.is_all_in);
        assert!(p.bet.is_zero());
        assert!(p.hole_cards.is_empty());
        assert!(p.is_in_game);
    }
}
