// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting moves and the betting situation a player is in.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{chips::Chips, player::Player};

/// The maximum number of bets and raises in a street.
pub const MAX_RAISES: u32 = 4;

/// A player betting move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BettingMove {
    /// Bet the whole stack.
    AllIn,
    /// Open the betting.
    Bet,
    /// Match the last bet.
    Call,
    /// Pass with nothing to match.
    Check,
    /// Give up the hand.
    Fold,
    /// Raise the last bet.
    Raise,
}

impl BettingMove {
    /// The move label.
    pub fn label(&self) -> &'static str {
        match self {
            BettingMove::AllIn => "all-in",
            BettingMove::Bet => "bet",
            BettingMove::Call => "call",
            BettingMove::Check => "check",
            BettingMove::Fold => "fold",
            BettingMove::Raise => "raise",
        }
    }

    /// The past tense label used when showing what a player did.
    pub fn past_label(&self) -> &'static str {
        match self {
            BettingMove::AllIn => "went all-in",
            BettingMove::Bet => "bet",
            BettingMove::Call => "called",
            BettingMove::Check => "checked",
            BettingMove::Fold => "folded",
            BettingMove::Raise => "raised",
        }
    }

    /// Checks if this move reopens the betting.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, BettingMove::Bet | BettingMove::Raise)
    }
}

impl fmt::Display for BettingMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A betting street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards dealt, blinds posted.
    Preflop,
    /// Three community cards.
    Flop,
    /// Fourth community card.
    Turn,
    /// Fifth community card.
    River,
}

impl Street {
    /// Returns all streets in play order.
    pub fn streets() -> impl DoubleEndedIterator<Item = Street> {
        [Street::Preflop, Street::Flop, Street::Turn, Street::River].into_iter()
    }

    /// The number of community cards dealt at the start of this street.
    pub fn cards_dealt(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "Pre-flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        };

        f.write_str(s)
    }
}

/// What a player can do given the table betting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    /// The stack cannot cover the last bet.
    CannotCall,
    /// The stack covers the last bet but not a raise.
    ShortCanCall,
    /// Nothing to match.
    Unopened,
    /// There is a bet to match.
    FacingBet,
    /// No more raises this street.
    Capped,
}

/// The betting state seen by the player to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    /// The player stack.
    pub chips: Chips,
    /// The player street bet.
    pub bet: Chips,
    /// The street total after a bet or raise.
    pub raise_amount: Chips,
    /// Bets and raises this street.
    pub times_raised: u32,
    /// The street bet to match.
    pub last_bet: Chips,
}

impl Spot {
    /// Creates the spot for a player.
    pub fn new(player: &Player, raise_amount: Chips, times_raised: u32, last_bet: Chips) -> Self {
        Self {
            chips: player.chips,
            bet: player.bet,
            raise_amount,
            times_raised,
            last_bet,
        }
    }

    /// Chips needed to match the last bet.
    pub fn to_call(&self) -> Chips {
        self.last_bet - self.bet
    }

    /// Chips needed to bet or raise.
    pub fn to_raise(&self) -> Chips {
        self.raise_amount - self.bet
    }

    /// Classifies this spot.
    ///
    /// A stack equal to the chips needed counts as short, the player can only
    /// put it in with an all-in.
    pub fn situation(&self) -> Situation {
        if self.chips <= self.to_raise() {
            if self.chips <= self.to_call() {
                Situation::CannotCall
            } else {
                Situation::ShortCanCall
            }
        } else if self.times_raised >= MAX_RAISES {
            Situation::Capped
        } else if self.bet == self.last_bet {
            Situation::Unopened
        } else {
            Situation::FacingBet
        }
    }

    /// The check or call move for this spot.
    pub fn passive_move(&self) -> BettingMove {
        if self.bet == self.last_bet {
            BettingMove::Check
        } else {
            BettingMove::Call
        }
    }

    /// The moves a player can make in this spot.
    pub fn legal_moves(&self) -> Vec<BettingMove> {
        match self.situation() {
            Situation::CannotCall => vec![BettingMove::AllIn, BettingMove::Fold],
            Situation::ShortCanCall => {
                vec![self.passive_move(), BettingMove::AllIn, BettingMove::Fold]
            }
            Situation::Unopened => vec![BettingMove::Check, BettingMove::Bet, BettingMove::Fold],
            Situation::FacingBet => vec![BettingMove::Call, BettingMove::Raise, BettingMove::Fold],
            Situation::Capped => vec![BettingMove::Call, BettingMove::Fold],
        }
    }

    /// Checks if a move is legal in this spot.
    pub fn is_legal(&self, mv: BettingMove) -> bool {
        self.legal_moves().contains(&mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(chips: u32, bet: u32, raise_amount: u32, times_raised: u32, last_bet: u32) -> Spot {
        Spot {
            chips: Chips::new(chips),
            bet: Chips::new(bet),
            raise_amount: Chips::new(raise_amount),
            times_raised,
            last_bet: Chips::new(last_bet),
        }
    }

    #[test]
    fn situations() {
        assert_eq!(spot(15, 0, 40, 0, 20).situation(), Situation::CannotCall);
        assert_eq!(spot(20, 0, 40, 0, 20).situation(), Situation::CannotCall);
        assert_eq!(spot(30, 0, 40, 0, 20).situation(), Situation::ShortCanCall);
        assert_eq!(spot(40, 0, 40, 0, 20).situation(), Situation::ShortCanCall);
        assert_eq!(spot(500, 20, 40, 1, 20).situation(), Situation::Unopened);
        assert_eq!(spot(500, 0, 40, 1, 20).situation(), Situation::FacingBet);
        assert_eq!(spot(500, 0, 100, 4, 80).situation(), Situation::Capped);
    }

    #[test]
    fn legal_moves() {
        use BettingMove::*;

        assert_eq!(spot(15, 0, 40, 0, 20).legal_moves(), vec![AllIn, Fold]);
        assert_eq!(spot(30, 0, 40, 0, 20).legal_moves(), vec![Call, AllIn, Fold]);
        assert_eq!(spot(30, 20, 60, 0, 20).legal_moves(), vec![Check, AllIn, Fold]);
        assert_eq!(spot(500, 0, 20, 0, 0).legal_moves(), vec![Check, Bet, Fold]);
        assert_eq!(spot(500, 0, 40, 1, 20).legal_moves(), vec![Call, Raise, Fold]);
        assert_eq!(spot(500, 0, 100, 4, 80).legal_moves(), vec![Call, Fold]);

        assert!(spot(500, 0, 40, 1, 20).is_legal(Raise));
        assert!(!spot(500, 0, 40, 1, 20).is_legal(Check));
    }

    #[test]
    fn amounts_to_match() {
        let s = spot(500, 20, 80, 1, 40);
        assert_eq!(s.to_call(), Chips::new(20));
        assert_eq!(s.to_raise(), Chips::new(60));
        assert_eq!(s.passive_move(), BettingMove::Call);
    }
}
