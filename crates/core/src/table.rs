// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fixed limit betting table.
use holdem_cards::Card;
use log::{debug, info};

use crate::{
    action::{BettingMove, Spot, Street},
    chips::Chips,
    error::LedgerError,
    ledger::{Payout, PotLedger},
    player::{Player, PlayerId},
};

/// The big blind doubles every this many hands.
pub const BLIND_INCREASE_HANDS: u32 = 5;

/// The table betting state for a hand.
#[derive(Debug, Clone)]
pub struct Table {
    /// The big blind.
    pub big_blind: Chips,
    /// The street bet to match.
    pub last_bet: Chips,
    /// The street total after a bet or raise.
    pub raise_amount: Chips,
    /// Bets and raises this street.
    pub times_raised: u32,
    /// Hands completed.
    pub hands_played: u32,
    /// The community cards.
    pub community: Vec<Card>,
    ledger: PotLedger,
}

impl Table {
    /// Creates a table with the given big blind.
    pub fn new(big_blind: Chips) -> Self {
        Self {
            big_blind,
            last_bet: Chips::ZERO,
            raise_amount: big_blind,
            times_raised: 0,
            hands_played: 0,
            community: Vec::with_capacity(5),
            ledger: PotLedger::default(),
        }
    }

    /// The small blind, half the big blind.
    pub fn small_blind(&self) -> Chips {
        self.big_blind / 2
    }

    /// The hand pots.
    pub fn ledger(&self) -> &PotLedger {
        &self.ledger
    }

    /// Mutable access to the hand pots.
    pub fn ledger_mut(&mut self) -> &mut PotLedger {
        &mut self.ledger
    }

    /// Resets the table for a new hand played by `active` players.
    pub fn reset(&mut self, active: impl IntoIterator<Item = PlayerId>) {
        self.community.clear();
        self.ledger.new_hand(active);
        self.last_bet = Chips::ZERO;
        self.times_raised = 0;

        if self.should_increase_big_blind() {
            self.big_blind = self.big_blind * 2;
            info!("Big blind raised to {}", self.big_blind);
        }

        self.raise_amount = self.big_blind;
    }

    /// Checks if the big blind doubles for the next hand.
    pub fn should_increase_big_blind(&self) -> bool {
        self.hands_played > 0 && self.hands_played % BLIND_INCREASE_HANDS == 0
    }

    /// Counts a completed hand.
    pub fn end_hand(&mut self) {
        self.hands_played += 1;
    }

    /// Adds a community card.
    pub fn deal_community(&mut self, card: Card) {
        self.community.push(card);
    }

    /// Takes the small blind, returns true if the player had to go all-in.
    pub fn take_small_blind(&mut self, player: &mut Player) -> Result<bool, LedgerError> {
        self.take_blind(player, self.small_blind())
    }

    /// Takes the big blind, returns true if the player had to go all-in.
    pub fn take_big_blind(&mut self, player: &mut Player) -> Result<bool, LedgerError> {
        self.take_blind(player, self.big_blind)
    }

    fn take_blind(&mut self, player: &mut Player, blind: Chips) -> Result<bool, LedgerError> {
        if player.chips > blind {
            self.last_bet = player.match_bet(blind)?;
            Ok(false)
        } else {
            self.all_in(player)?;
            Ok(true)
        }
    }

    /// Applies a player move to the table.
    pub fn take_bet(&mut self, player: &mut Player, mv: BettingMove) -> Result<(), LedgerError> {
        match mv {
            BettingMove::Check | BettingMove::Call => {
                self.last_bet = player.match_bet(self.last_bet)?;
            }
            BettingMove::Bet | BettingMove::Raise => {
                self.times_raised += 1;
                self.last_bet = player.match_bet(self.raise_amount)?;
            }
            BettingMove::AllIn => self.all_in(player)?,
            BettingMove::Fold => player.fold(),
        }

        debug!("Player {} {} bet {}", player.id, mv.past_label(), player.bet);
        Ok(())
    }

    fn all_in(&mut self, player: &mut Player) -> Result<(), LedgerError> {
        player.go_all_in();
        self.ledger.record_all_in(&*player, player.bet)?;
        debug!(
            "Player {} all-in for {}, breakpoints {:?}",
            player.id,
            player.bet,
            self.ledger.breakpoints()
        );
        if player.bet > self.last_bet {
            self.last_bet = player.bet;
        }

        Ok(())
    }

    /// Sets the bet or raise amount for the street.
    ///
    /// Bets go up by the big blind pre-flop and on the flop, and by twice the
    /// big blind on the turn and river.
    pub fn update_raise_amount(&mut self, street: Street) {
        self.raise_amount = match street {
            Street::Preflop | Street::Flop => self.last_bet + self.big_blind,
            Street::Turn | Street::River => self.last_bet + self.big_blind * 2,
        };
    }

    /// Starts a new betting street.
    pub fn start_street(&mut self) {
        self.last_bet = Chips::ZERO;
        self.times_raised = 0;
    }

    /// The betting spot for a player.
    pub fn spot(&self, player: &Player) -> Spot {
        Spot::new(player, self.raise_amount, self.times_raised, self.last_bet)
    }

    /// Collects the players bets into the pots.
    pub fn settle_street(&mut self, players: &mut [Player]) -> Result<(), LedgerError> {
        for player in players.iter().filter(|p| p.is_in_game) {
            self.ledger.record_street_contribution(player.id, player.bet)?;
        }

        debug!("Collecting {} street bets", self.ledger.pending());
        for player in players.iter_mut().filter(|p| p.is_in_game) {
            player.bet = Chips::ZERO;
        }

        let active = players.iter().filter(|p| p.is_in_game).collect::<Vec<_>>();
        self.ledger.settle_street(active.as_slice())
    }

    /// Pays a pot to its winners.
    pub fn award(
        &mut self,
        index: usize,
        winners: &[PlayerId],
        players: &mut [Player],
    ) -> Result<Payout, LedgerError> {
        let payout = self.ledger.award_pot(index, winners)?;
        for player in players.iter_mut().filter(|p| winners.contains(&p.id)) {
            player.credit(payout.share);
        }

        Ok(payout)
    }
}
