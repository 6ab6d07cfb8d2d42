// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game driver, runs hands from the deal to the showdown.
use anyhow::{Context, Result, bail};
use log::{debug, info};
use rand::{Rng, rngs::StdRng, seq::SliceRandom};

use holdem_bot::{Personality, Strategy};
use holdem_core::{
    BettingMove, Card, Chips, Deck, Payout, Player, PlayerId, Spot, Street, Table,
};
use holdem_eval::{Showdown, determine_showdown_winners};

/// Computer player names.
static NAMES: &[&str] = &[
    "Homer", "Bart", "Lisa", "Marge", "Milhouse", "Moe", "Maggie", "Nelson", "Ralph",
];

/// The game configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// The human player name.
    pub name: String,
    /// Number of computer players.
    pub computers: u8,
    /// Starting chips for each player.
    pub chips: Chips,
    /// The starting big blind.
    pub big_blind: Chips,
}

impl GameConfig {
    /// The smallest big blind for a starting stack.
    pub fn min_big_blind(chips: Chips) -> Chips {
        chips / 50
    }

    /// The largest big blind for a starting stack.
    pub fn max_big_blind(chips: Chips) -> Chips {
        chips / 10
    }

    /// Checks the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("The player name cannot be empty");
        }

        if !(1..=5).contains(&self.computers) {
            bail!("Computer players must be between 1 and 5");
        }

        if !(100..=999_999).contains(&self.chips.amount()) {
            bail!("Starting chips must be between 100 and 999,999");
        }

        let (min, max) = (
            Self::min_big_blind(self.chips),
            Self::max_big_blind(self.chips),
        );
        if self.big_blind < min || self.big_blind > max {
            bail!("The big blind must be between {min} and {max}");
        }

        Ok(())
    }
}

/// Who makes the decisions for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// The human at the terminal.
    Human,
    /// A computer player.
    Computer(Personality),
}

/// Something that happened at the table.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// The deck is shuffled for a new hand.
    Shuffling,
    /// The big blind doubled.
    BlindIncrease(Chips),
    /// A new street starts.
    Street {
        /// The street.
        street: Street,
        /// The dealer.
        dealer: PlayerId,
    },
    /// A player posted a blind.
    Blind {
        /// The player.
        player: PlayerId,
        /// The big or the small blind.
        big: bool,
        /// The player had to go all-in.
        all_in: bool,
    },
    /// A player made a move.
    Move {
        /// The player.
        player: PlayerId,
        /// The move.
        mv: BettingMove,
        /// The player bet after the move.
        bet: Chips,
    },
    /// Everybody else folded.
    WinByFold {
        /// The winner.
        player: PlayerId,
        /// The chips won.
        amount: Chips,
    },
    /// Only one player can win the last pot.
    Uncontested {
        /// The winner.
        player: PlayerId,
        /// The pot paid.
        payout: Payout,
    },
    /// A pot showdown.
    Showdown {
        /// The hands shown.
        showdown: Showdown<PlayerId>,
        /// The pot paid.
        payout: Payout,
    },
    /// A player has no chips left.
    PlayerOut(PlayerId),
    /// The game has ended.
    GameOver {
        /// The players with the most chips.
        winners: Vec<PlayerId>,
    },
}

/// The game input and output.
pub trait Frontend {
    /// Shows the table.
    fn show_table(&mut self, players: &[Player], table: &Table) -> Result<()>;

    /// Shows an event.
    fn show_event(&mut self, event: &GameEvent, players: &[Player]) -> Result<()>;

    /// Asks the human player for a move, the move must be legal for `spot`.
    fn human_move(&mut self, player: &Player, spot: &Spot) -> Result<BettingMove>;

    /// Asks the human player whether to play another hand.
    fn continue_playing(&mut self) -> Result<bool>;
}

/// A game with one human and some computer players.
#[derive(Debug)]
pub struct Game {
    players: Vec<Player>,
    seats: Vec<Seat>,
    table: Table,
    deck: Deck,
    dealer: Option<usize>,
    discarded: Chips,
    rng: StdRng,
}

impl Game {
    /// Creates a new game, the human player has the first seat.
    pub fn new(config: &GameConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;

        let mut names = NAMES
            .iter()
            .filter(|n| !n.eq_ignore_ascii_case(config.name.trim()))
            .copied()
            .collect::<Vec<_>>();
        names.shuffle(&mut rng);

        let mut players = vec![Player::new(PlayerId::new(0), config.name.trim(), config.chips)];
        let mut seats = vec![Seat::Human];

        for (idx, name) in names.iter().take(config.computers as usize).enumerate() {
            let personality = Personality::choose(&mut rng);
            info!("{name} plays {personality}");
            players.push(Player::new(PlayerId::new(idx as u8 + 1), *name, config.chips));
            seats.push(Seat::Computer(personality));
        }

        Ok(Self {
            players,
            seats,
            table: Table::new(config.big_blind),
            deck: Deck::default(),
            dealer: None,
            discarded: Chips::ZERO,
            rng,
        })
    }

    /// All the players, including those out of the game.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The table state.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The chips lost to uneven pot splits.
    pub fn discarded(&self) -> Chips {
        self.discarded
    }

    /// Plays hands until one player is left or the human stops.
    pub fn play<F: Frontend>(&mut self, ui: &mut F) -> Result<()> {
        loop {
            self.start_hand(ui)?;

            for street in Street::streets() {
                self.deal(street, ui)?;
                self.betting_round(street, ui)?;
                if self.is_hand_over() {
                    break;
                }
            }

            self.determine_winners(ui)?;
            self.table.end_hand();

            if self.is_game_over(ui)? {
                break;
            }
        }

        Ok(())
    }

    fn active(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|idx| self.players[*idx].is_in_game)
            .collect()
    }

    fn start_hand<F: Frontend>(&mut self, ui: &mut F) -> Result<()> {
        for player in self.players.iter_mut() {
            player.reset();
        }

        self.assign_positions()?;

        let increase = self.table.should_increase_big_blind();
        let active = self.active();
        self.table.reset(active.iter().map(|idx| self.players[*idx].id));
        if increase {
            ui.show_table(&self.players, &self.table)?;
            ui.show_event(&GameEvent::BlindIncrease(self.table.big_blind), &self.players)?;
        }

        self.deck.refill();
        self.deck.shuffle(&mut self.rng);
        ui.show_event(&GameEvent::Shuffling, &self.players)?;

        Ok(())
    }

    /// Moves the button and sets the blinds.
    fn assign_positions(&mut self) -> Result<()> {
        let active = self.active();
        if active.len() < 2 {
            bail!("Need at least two players to play a hand");
        }

        let dealer = match self.dealer {
            None => active[self.rng.random_range(0..active.len())],
            Some(old) => (1..=self.players.len())
                .map(|step| (old + step) % self.players.len())
                .find(|idx| self.players[*idx].is_in_game)
                .context("No player left for the button")?,
        };

        self.dealer = Some(dealer);
        self.players[dealer].is_dealer = true;

        let pos = active
            .iter()
            .position(|idx| *idx == dealer)
            .context("Dealer is not in the game")?;

        // Heads-up the dealer posts the small blind.
        let (sb, bb) = if active.len() == 2 {
            (active[pos], active[(pos + 1) % 2])
        } else {
            (
                active[(pos + 1) % active.len()],
                active[(pos + 2) % active.len()],
            )
        };

        self.players[sb].is_sb = true;
        self.players[bb].is_bb = true;

        debug!(
            "Dealer {} small blind {} big blind {}",
            self.players[dealer].name, self.players[sb].name, self.players[bb].name
        );

        Ok(())
    }

    fn dealer_id(&self) -> Result<PlayerId> {
        self.dealer
            .map(|idx| self.players[idx].id)
            .context("No dealer assigned")
    }

    fn draw(&mut self) -> Result<Card> {
        self.deck.deal().context("The deck is empty")
    }

    fn deal<F: Frontend>(&mut self, street: Street, ui: &mut F) -> Result<()> {
        let dealer = self.dealer_id()?;
        ui.show_event(&GameEvent::Street { street, dealer }, &self.players)?;

        if street == Street::Preflop {
            // One card at a time starting left of the dealer.
            let active = self.active();
            let pos = active
                .iter()
                .position(|idx| self.players[*idx].id == dealer)
                .unwrap_or(0);

            for _ in 0..2 {
                for step in 1..=active.len() {
                    let idx = active[(pos + step) % active.len()];
                    let card = self.draw()?;
                    self.players[idx].deal(card);
                }
            }
        } else {
            self.deck.burn();
            for _ in 0..street.cards_dealt() {
                let card = self.draw()?;
                self.table.deal_community(card);
            }
        }

        ui.show_table(&self.players, &self.table)
    }

    fn post_blinds<F: Frontend>(&mut self, ui: &mut F) -> Result<()> {
        for big in [false, true] {
            let idx = self
                .players
                .iter()
                .position(|p| p.is_in_game && if big { p.is_bb } else { p.is_sb })
                .context("Blind position not assigned")?;

            let player = &mut self.players[idx];
            let all_in = if big {
                self.table.take_big_blind(player)?
            } else {
                self.table.take_small_blind(player)?
            };

            let event = GameEvent::Blind {
                player: player.id,
                big,
                all_in,
            };

            ui.show_event(&event, &self.players)?;
            ui.show_table(&self.players, &self.table)?;
        }

        Ok(())
    }

    /// The position in `active` of the first player to act.
    fn first_to_act(&self, street: Street, active: &[usize]) -> usize {
        let position = |f: fn(&Player) -> bool| {
            active
                .iter()
                .position(|idx| f(&self.players[*idx]))
                .unwrap_or(0)
        };

        if active.len() == 2 {
            position(|p| p.is_dealer)
        } else if street == Street::Preflop {
            position(|p| p.is_bb) + 1
        } else {
            position(|p| p.is_dealer) + 1
        }
    }

    fn betting_round<F: Frontend>(&mut self, street: Street, ui: &mut F) -> Result<()> {
        self.table.start_street();
        if street == Street::Preflop {
            self.post_blinds(ui)?;
        }

        let active = self.active();
        let mut turn = self.first_to_act(street, &active);

        loop {
            let players = &self.players;
            if active
                .iter()
                .all(|idx| players[*idx].is_locked || players[*idx].is_all_in)
            {
                break;
            }

            if active.iter().filter(|idx| !players[**idx].is_folded).count() == 1 {
                break;
            }

            let idx = active[turn % active.len()];
            turn += 1;

            if self.players[idx].is_folded || self.players[idx].is_all_in {
                continue;
            }

            self.table.update_raise_amount(street);
            let spot = self.table.spot(&self.players[idx]);
            let mv = match self.seats[idx] {
                Seat::Human => ui.human_move(&self.players[idx], &spot)?,
                Seat::Computer(personality) => personality.execute(&spot, self.rng.random()),
            };

            if !spot.is_legal(mv) {
                bail!("Illegal move {mv} for {}", self.players[idx].name);
            }

            let last_bet = self.table.last_bet;
            self.table.take_bet(&mut self.players[idx], mv)?;
            self.reopen_betting(&active, mv, last_bet);

            let player = &mut self.players[idx];
            player.is_locked = true;

            let event = GameEvent::Move {
                player: player.id,
                mv,
                bet: player.bet,
            };

            ui.show_event(&event, &self.players)?;
            ui.show_table(&self.players, &self.table)?;
        }

        for idx in &active {
            let player = &mut self.players[*idx];
            if !player.is_folded && !player.is_all_in {
                player.is_locked = false;
            }
        }

        self.table.settle_street(&mut self.players)?;
        ui.show_table(&self.players, &self.table)
    }

    /// Unlocks the players that must act again after `mv`.
    ///
    /// A bet or raise reopens the betting for every unfolded player. An all-in
    /// above `last_bet` doesn't count as a raise, the players that can still
    /// bet only have to respond to it.
    fn reopen_betting(&mut self, active: &[usize], mv: BettingMove, last_bet: Chips) {
        if mv.is_aggressive() {
            for idx in active {
                let player = &mut self.players[*idx];
                player.is_locked = player.is_folded || player.is_all_in;
            }
        } else if mv == BettingMove::AllIn && self.table.last_bet > last_bet {
            let to_match = self.table.last_bet;
            for idx in active {
                let player = &mut self.players[*idx];
                if player.can_bet() && player.bet < to_match {
                    player.is_locked = false;
                }
            }
        }
    }

    /// The hand is over when less than two players can still bet.
    fn is_hand_over(&self) -> bool {
        self.players.iter().filter(|p| p.can_bet()).count() < 2
    }

    fn determine_winners<F: Frontend>(&mut self, ui: &mut F) -> Result<()> {
        self.table.ledger_mut().drop_empty_last_pot();

        let unfolded = self
            .players
            .iter()
            .filter(|p| p.is_in_game && !p.is_folded)
            .map(|p| p.id)
            .collect::<Vec<_>>();

        if let [winner] = unfolded.as_slice() {
            let mut amount = Chips::ZERO;
            for idx in 0..self.table.ledger().pots().len() {
                let payout = self.table.award(idx, &[*winner], &mut self.players)?;
                amount += payout.share;
            }

            ui.show_table(&self.players, &self.table)?;
            let event = GameEvent::WinByFold {
                player: *winner,
                amount,
            };
            return ui.show_event(&event, &self.players);
        }

        let pots = self.table.ledger().pots().len();
        if let Some(last) = pots.checked_sub(1) {
            let eligible = unfolded
                .iter()
                .filter(|id| self.table.ledger().pots()[last].is_eligible(**id))
                .copied()
                .collect::<Vec<_>>();

            if let [player] = eligible.as_slice() {
                let payout = self.table.award(last, &[*player], &mut self.players)?;
                self.discarded += payout.remainder;
                ui.show_table(&self.players, &self.table)?;
                let event = GameEvent::Uncontested {
                    player: *player,
                    payout,
                };
                ui.show_event(&event, &self.players)?;
            }
        }

        while self.table.community.len() < 5 {
            let card = self.draw()?;
            self.table.deal_community(card);
        }

        let board: [Card; 5] = self.table.community.as_slice().try_into()?;
        ui.show_table(&self.players, &self.table)?;

        for idx in (0..pots).rev() {
            let pot = &self.table.ledger().pots()[idx];
            if pot.is_awarded() {
                continue;
            }

            let contenders = self
                .players
                .iter()
                .filter(|p| p.is_in_game && !p.is_folded && pot.is_eligible(p.id))
                .map(|p| -> Result<(PlayerId, [Card; 2])> {
                    Ok((p.id, p.hole().context("Player without hole cards")?))
                })
                .collect::<Result<Vec<_>>>()?;

            if contenders.is_empty() {
                debug!("Pot {idx} has no contenders");
                self.table.ledger_mut().roll_into_lower(idx)?;
                continue;
            }

            let showdown = determine_showdown_winners(&contenders, &board)?;
            let payout = self
                .table
                .award(idx, &showdown.winners(), &mut self.players)?;
            self.discarded += payout.remainder;

            ui.show_event(&GameEvent::Showdown { showdown, payout }, &self.players)?;
        }

        Ok(())
    }

    /// Removes busted players and checks if the game should end.
    fn is_game_over<F: Frontend>(&mut self, ui: &mut F) -> Result<bool> {
        for idx in 0..self.players.len() {
            let player = &mut self.players[idx];
            if player.is_in_game && player.chips.is_zero() {
                player.is_in_game = false;
                info!("{} is out of the game", player.name);
                let id = player.id;
                ui.show_event(&GameEvent::PlayerOut(id), &self.players)?;
            }
        }

        let active = self.active();
        let done = active.len() < 2 || !ui.continue_playing()?;
        if done {
            let most = active
                .iter()
                .map(|idx| self.players[*idx].chips)
                .max()
                .unwrap_or_default();

            let winners = active
                .iter()
                .filter(|idx| self.players[**idx].chips == most)
                .map(|idx| self.players[*idx].id)
                .collect();

            ui.show_table(&self.players, &self.table)?;
            ui.show_event(&GameEvent::GameOver { winners }, &self.players)?;
        }

        Ok(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Plays a fixed number of hands picking the human moves at random.
    struct Scripted {
        hands: usize,
        rng: StdRng,
        events: Vec<GameEvent>,
    }

    impl Scripted {
        fn new(hands: usize, seed: u64) -> Self {
            Self {
                hands,
                rng: StdRng::seed_from_u64(seed),
                events: Vec::new(),
            }
        }
    }

    impl Frontend for Scripted {
        fn show_table(&mut self, _players: &[Player], _table: &Table) -> Result<()> {
            Ok(())
        }

        fn show_event(&mut self, event: &GameEvent, _players: &[Player]) -> Result<()> {
            self.events.push(event.clone());
            Ok(())
        }

        fn human_move(&mut self, _player: &Player, spot: &Spot) -> Result<BettingMove> {
            let moves = spot.legal_moves();
            Ok(moves[self.rng.random_range(0..moves.len())])
        }

        fn continue_playing(&mut self) -> Result<bool> {
            self.hands = self.hands.saturating_sub(1);
            Ok(self.hands > 0)
        }
    }

    fn config(computers: u8) -> GameConfig {
        GameConfig {
            name: "Ann".to_string(),
            computers,
            chips: Chips::new(1_000),
            big_blind: Chips::new(20),
        }
    }

    fn total_chips(game: &Game) -> Chips {
        game.players().iter().map(|p| p.chips).sum()
    }

    #[test]
    fn config_validation() {
        assert!(config(3).validate().is_ok());
        assert!(config(0).validate().is_err());
        assert!(config(6).validate().is_err());

        let mut c = config(3);
        c.big_blind = Chips::new(19);
        assert!(c.validate().is_err());
        c.big_blind = Chips::new(100);
        assert!(c.validate().is_ok());
        c.big_blind = Chips::new(101);
        assert!(c.validate().is_err());

        let mut c = config(3);
        c.name = "  ".to_string();
        assert!(c.validate().is_err());

        let mut c = config(3);
        c.chips = Chips::new(99);
        c.big_blind = Chips::new(2);
        assert!(c.validate().is_err());
    }

    #[test]
    fn computer_names() {
        let mut c = config(5);
        c.name = "Homer".to_string();
        let game = Game::new(&c, StdRng::seed_from_u64(1)).unwrap();

        let names = game.players().iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "Homer");
        assert!(names[1..].iter().all(|n| *n != "Homer" && NAMES.contains(n)));
    }

    #[test]
    fn positions_rotate() {
        let mut game = Game::new(&config(3), StdRng::seed_from_u64(5)).unwrap();
        game.assign_positions().unwrap();
        let first = game.dealer.unwrap();

        let dealer = &game.players[first];
        let sb = &game.players[(first + 1) % 4];
        let bb = &game.players[(first + 2) % 4];
        assert!(dealer.is_dealer && sb.is_sb && bb.is_bb);

        for p in game.players.iter_mut() {
            p.reset();
        }

        game.players[(first + 1) % 4].is_in_game = false;
        game.assign_positions().unwrap();
        assert_eq!(game.dealer, Some((first + 2) % 4));
    }

    #[test]
    fn heads_up_dealer_posts_small_blind() {
        let mut game = Game::new(&config(1), StdRng::seed_from_u64(9)).unwrap();
        game.assign_positions().unwrap();
        let dealer = game.dealer.unwrap();
        assert!(game.players[dealer].is_sb);
        assert!(game.players[1 - dealer].is_bb);

        let active = game.active();
        assert_eq!(game.first_to_act(Street::Preflop, &active), dealer);
        assert_eq!(game.first_to_act(Street::River, &active), dealer);
    }

    #[test]
    fn all_in_reopens_betting() {
        let mut game = Game::new(&config(3), StdRng::seed_from_u64(7)).unwrap();
        let active = game.active();
        for p in game.players.iter_mut() {
            p.is_locked = true;
        }

        game.players[3].is_folded = true;
        game.players[1].bet = Chips::new(20);
        game.players[2].chips = Chips::new(30);
        game.table.take_bet(&mut game.players[2], BettingMove::AllIn).unwrap();

        game.reopen_betting(&active, BettingMove::AllIn, Chips::new(20));
        let locked = game.players.iter().map(|p| p.is_locked).collect::<Vec<_>>();
        assert_eq!(locked, vec![false, false, true, true]);

        for p in game.players.iter_mut() {
            p.is_locked = true;
        }

        // Raising unlocks everybody that is still betting.
        game.reopen_betting(&active, BettingMove::Raise, Chips::new(30));
        let locked = game.players.iter().map(|p| p.is_locked).collect::<Vec<_>>();
        assert_eq!(locked, vec![false, false, true, true]);

        // An all-in below the bet reopens nothing.
        for p in game.players.iter_mut() {
            p.is_locked = true;
        }
        game.reopen_betting(&active, BettingMove::AllIn, Chips::new(100));
        assert!(game.players.iter().all(|p| p.is_locked));
    }

    #[test]
    fn chips_are_conserved() {
        for seed in 0..20 {
            let mut game = Game::new(&config(4), StdRng::seed_from_u64(seed)).unwrap();
            let start = total_chips(&game);

            let mut ui = Scripted::new(15, seed);
            game.play(&mut ui).unwrap();

            assert_eq!(total_chips(&game) + game.discarded(), start);
            assert!(game.table().ledger().pots().iter().all(|p| p.is_awarded()));
            assert!(game.players().iter().all(|p| p.bet.is_zero()));
            assert!(matches!(ui.events.last(), Some(GameEvent::GameOver { .. })));
        }
    }

    #[test]
    fn game_ends_with_one_player() {
        let mut game = Game::new(&config(2), StdRng::seed_from_u64(42)).unwrap();
        let start = total_chips(&game);

        let mut ui = Scripted::new(usize::MAX, 42);
        game.play(&mut ui).unwrap();

        let left = game.players().iter().filter(|p| p.is_in_game).count();
        assert_eq!(left, 1);
        assert_eq!(total_chips(&game) + game.discarded(), start);

        let Some(GameEvent::GameOver { winners }) = ui.events.last() else {
            panic!("game did not end");
        };
        assert_eq!(winners.len(), 1);
    }
}
