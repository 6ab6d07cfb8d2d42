// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Main and side pots accounting.
//!
//! Bets are collected at the end of each street. When some players went all-in
//! the street bets are split at each all-in amount so that a player can only
//! win what it could match, every split opens a new side pot.
use ahash::AHashSet;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{chips::Chips, error::LedgerError, player::PlayerId};

/// The player state the ledger needs to assign pots.
pub trait Participant {
    /// The player id.
    fn id(&self) -> PlayerId;

    /// The player folded this hand.
    fn is_folded(&self) -> bool;

    /// The player has bet all its chips.
    fn is_all_in(&self) -> bool;
}

impl<T: Participant> Participant for &T {
    fn id(&self) -> PlayerId {
        (**self).id()
    }

    fn is_folded(&self) -> bool {
        (**self).is_folded()
    }

    fn is_all_in(&self) -> bool {
        (**self).is_all_in()
    }
}

/// A pot and the players that can win it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pot {
    amount: Chips,
    players: AHashSet<PlayerId>,
    awarded: bool,
}

impl Pot {
    fn new(players: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            amount: Chips::ZERO,
            players: players.into_iter().collect(),
            awarded: false,
        }
    }

    /// The pot chips.
    pub fn amount(&self) -> Chips {
        self.amount
    }

    /// The players eligible to win this pot.
    pub fn players(&self) -> &AHashSet<PlayerId> {
        &self.players
    }

    /// Checks if a player can win this pot.
    pub fn is_eligible(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    /// Checks if this pot has already been paid.
    pub fn is_awarded(&self) -> bool {
        self.awarded
    }
}

/// The chips each winner gets from a pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// The pot index.
    pub pot: usize,
    /// The chips paid to each winner.
    pub share: Chips,
    /// The chips that could not be split evenly, these go to no one.
    pub remainder: Chips,
    /// The pot winners.
    pub winners: Vec<PlayerId>,
}

/// Pots for a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotLedger {
    pots: Vec<Pot>,
    breakpoints: Vec<Chips>,
    street: Vec<(PlayerId, Chips)>,
}

impl Default for PotLedger {
    fn default() -> Self {
        Self {
            pots: vec![Pot::default()],
            breakpoints: Vec::new(),
            street: Vec::new(),
        }
    }
}

impl PotLedger {
    /// Starts a hand with one empty pot that all `players` can win.
    pub fn new_hand(&mut self, players: impl IntoIterator<Item = PlayerId>) {
        self.pots.clear();
        self.pots.push(Pot::new(players));
        self.breakpoints.clear();
        self.street.clear();
    }

    /// The hand pots, main pot first.
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// The chips in all pots.
    pub fn total(&self) -> Chips {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// The chips recorded this street and not yet settled.
    pub fn pending(&self) -> Chips {
        self.street.iter().map(|(_, c)| c).sum()
    }

    /// The all-in amounts recorded this street.
    pub fn breakpoints(&self) -> &[Chips] {
        &self.breakpoints
    }

    /// Records that a player went all-in with a street bet of `amount`.
    pub fn record_all_in<P: Participant>(
        &mut self,
        player: &P,
        amount: Chips,
    ) -> Result<(), LedgerError> {
        if player.is_folded() {
            return Err(LedgerError::FoldedContribution(player.id()));
        }

        if !self.breakpoints.contains(&amount) {
            self.breakpoints.push(amount);
        }

        Ok(())
    }

    /// Records the chips a player bet this street.
    pub fn record_street_contribution(
        &mut self,
        player: PlayerId,
        amount: Chips,
    ) -> Result<(), LedgerError> {
        if self.street.iter().any(|(p, _)| *p == player) {
            return Err(LedgerError::DuplicateContribution(player));
        }

        self.street.push((player, amount));
        Ok(())
    }

    /// Moves the street contributions into the pots.
    ///
    /// The contributions are split at each all-in amount, every split closes
    /// the open pot and opens a new one for the players that have chips left
    /// to put in. After the last split the new pot is for the players that can
    /// still bet, so that it collects the bets of the following streets.
    pub fn settle_street<P: Participant>(&mut self, active: &[P]) -> Result<(), LedgerError> {
        if active.is_empty() {
            return Err(LedgerError::NoActivePlayers);
        }

        let mut remaining = std::mem::take(&mut self.street);
        let mut breakpoints = std::mem::take(&mut self.breakpoints);
        breakpoints.sort();

        let mut previous = Chips::ZERO;
        for (idx, breakpoint) in breakpoints.iter().enumerate() {
            let delta = *breakpoint - previous;
            previous = *breakpoint;

            let pot = self.open_pot();
            for (_, bet) in remaining.iter_mut().filter(|(_, bet)| !bet.is_zero()) {
                let chips = (*bet).min(delta);
                pot.amount += chips;
                *bet -= chips;
            }

            let next = if idx == breakpoints.len() - 1 {
                Pot::new(
                    active
                        .iter()
                        .filter(|p| !p.is_folded() && !p.is_all_in())
                        .map(|p| p.id()),
                )
            } else {
                Pot::new(
                    remaining
                        .iter()
                        .filter(|(_, bet)| !bet.is_zero())
                        .map(|(p, _)| *p),
                )
            };

            debug!(
                "Closed pot {} with {} at all-in {breakpoint}",
                self.pots.len() - 1,
                self.pots[self.pots.len() - 1].amount
            );

            self.pots.push(next);
        }

        let leftover = remaining.iter().map(|(_, bet)| bet).sum::<Chips>();
        self.open_pot().amount += leftover;

        debug!("Settled street, {} pots total {}", self.pots.len(), self.total());
        Ok(())
    }

    /// Removes the last pot if it has no chips.
    pub fn drop_empty_last_pot(&mut self) -> bool {
        if self.pots.last().is_some_and(|p| p.amount.is_zero()) {
            self.pots.pop();
            true
        } else {
            false
        }
    }

    /// Moves the chips of a pot nobody can win into the pot below it.
    pub fn roll_into_lower(&mut self, index: usize) -> Result<Chips, LedgerError> {
        if index == 0 || index >= self.pots.len() {
            return Err(LedgerError::BadPotIndex(index));
        }

        if self.pots[index].awarded {
            return Err(LedgerError::AlreadyAwarded(index));
        }

        let amount = std::mem::take(&mut self.pots[index].amount);
        self.pots[index].awarded = true;
        self.pots[index - 1].amount += amount;

        debug!("Pot {index} rolled {amount} into pot {}", index - 1);
        Ok(amount)
    }

    /// Splits a pot evenly among its winners.
    ///
    /// The chips left over from the integer split are not paid to anyone and
    /// are reported in the payout.
    pub fn award_pot(&mut self, index: usize, winners: &[PlayerId]) -> Result<Payout, LedgerError> {
        let pot = self
            .pots
            .get_mut(index)
            .ok_or(LedgerError::BadPotIndex(index))?;

        if pot.awarded {
            return Err(LedgerError::AlreadyAwarded(index));
        }

        if winners.is_empty() {
            return Err(LedgerError::NoWinners(index));
        }

        let count = winners.len() as u32;
        let share = pot.amount / count;
        let remainder = pot.amount % count;
        pot.awarded = true;

        info!("Pot {index} of {} awarded {share} to {count} winners", pot.amount);
        if !remainder.is_zero() {
            info!("Pot {index} discarded remainder {remainder}");
        }

        Ok(Payout {
            pot: index,
            share,
            remainder,
            winners: winners.to_vec(),
        })
    }

    fn open_pot(&mut self) -> &mut Pot {
        if self.pots.is_empty() {
            self.pots.push(Pot::default());
        }

        let last = self.pots.len() - 1;
        &mut self.pots[last]
    }
}
