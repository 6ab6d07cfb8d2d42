// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::{Result, bail};
use crossterm::{
    cursor, execute, queue,
    style::{self, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};

use holdem_core::{BettingMove, Card, Chips, Player, PlayerId, Spot, Suit, Table};

use crate::game::{Frontend, GameEvent};

/// A terminal front end that reads the human moves from `input`.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    human: PlayerId,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    /// Creates a terminal on stdin and stdout.
    pub fn stdio(human: PlayerId) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), human)
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Creates a terminal with the given input and output.
    pub fn new(input: R, output: W, human: PlayerId) -> Self {
        Self {
            input,
            output,
            human,
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed");
        }

        Ok(line.trim().to_string())
    }

    fn wait_enter(&mut self) -> Result<()> {
        write!(self.output, "\nPress enter to continue...")?;
        self.output.flush()?;
        self.read_line().map(|_| ())
    }

    fn print_card(&mut self, card: &Card) -> Result<()> {
        let text = format!("{}{}", card.rank(), card.suit().symbol());
        let styled = match card.suit() {
            Suit::Hearts | Suit::Diamonds => text.red(),
            Suit::Clubs | Suit::Spades => text.white(),
        };

        queue!(self.output, style::PrintStyledContent(styled.bold()))?;
        Ok(())
    }

    fn print_cards(&mut self, cards: &[Card]) -> Result<()> {
        for card in cards {
            self.print_card(card)?;
            write!(self.output, "  ")?;
        }

        Ok(())
    }

    fn print_player(&mut self, p: &Player) -> Result<()> {
        if !p.is_in_game {
            let text = format!("{:>12}  [OUT OF CHIPS]", p.name);
            queue!(self.output, style::PrintStyledContent(text.dark_grey()))?;
            writeln!(self.output)?;
            return Ok(());
        }

        write!(self.output, "{:>12}  ", p.name)?;
        if p.is_folded || p.hole_cards.is_empty() {
            write!(self.output, "{:10}", "")?;
        } else if p.id == self.human {
            self.print_cards(&p.hole_cards)?;
            write!(self.output, "{:>2}", "")?;
        } else {
            write!(self.output, "{:10}", "▒▒  ▒▒")?;
        }

        let chips = if p.is_all_in {
            "all-in".to_string()
        } else {
            p.chips.to_string()
        };
        write!(self.output, "Chips: {chips:>9}  Bet: {:>9}", p.bet.to_string())?;

        for (flag, label) in [(p.is_dealer, "D"), (p.is_sb, "SB"), (p.is_bb, "BB")] {
            if flag {
                let text = format!("  <{label}>");
                queue!(self.output, style::PrintStyledContent(text.yellow()))?;
            }
        }

        if p.is_folded {
            queue!(self.output, style::PrintStyledContent("  folded".dark_grey()))?;
        }

        writeln!(self.output)?;
        Ok(())
    }

    fn name(players: &[Player], id: PlayerId) -> &str {
        players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    }

    fn pot_label(pot: usize) -> String {
        if pot == 0 {
            "the pot".to_string()
        } else {
            format!("side pot #{pot}")
        }
    }
}

/// Parses a move typed by the user, `c` is a check or a call.
pub fn parse_move(input: &str, spot: &Spot) -> Option<BettingMove> {
    let mv = match input.trim().to_ascii_lowercase().as_str() {
        "a" | "all-in" | "allin" => BettingMove::AllIn,
        "b" | "bet" => BettingMove::Bet,
        "r" | "raise" => BettingMove::Raise,
        "f" | "fold" => BettingMove::Fold,
        "c" => spot.passive_move(),
        "call" => BettingMove::Call,
        "check" => BettingMove::Check,
        _ => return None,
    };

    spot.is_legal(mv).then_some(mv)
}

impl<R: BufRead, W: Write> Frontend for Terminal<R, W> {
    fn show_table(&mut self, players: &[Player], table: &Table) -> Result<()> {
        execute!(self.output, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        writeln!(self.output)?;
        for player in players {
            self.print_player(player)?;
        }

        write!(self.output, "\n{:>12}  ", "Community")?;
        self.print_cards(&table.community)?;
        writeln!(self.output, "\n")?;

        writeln!(
            self.output,
            "{:>12}  {}  Big blind: {}",
            "Small blind",
            table.small_blind(),
            table.big_blind
        )?;

        let pots = table.ledger().pots();
        write!(self.output, "{:>12}  {}", "Pot", pots.first().map(|p| p.amount()).unwrap_or_default())?;
        for (idx, pot) in pots.iter().enumerate().skip(1) {
            let mut names = players
                .iter()
                .filter(|p| !p.is_folded && pot.players().contains(&p.id))
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>();
            names.sort_unstable();
            write!(
                self.output,
                "  Side pot #{idx}: {} ({})",
                pot.amount(),
                names.join(", ")
            )?;
        }

        writeln!(self.output, "\n")?;
        self.output.flush()?;
        Ok(())
    }

    fn show_event(&mut self, event: &GameEvent, players: &[Player]) -> Result<()> {
        let name = |id| Self::name(players, id);
        match event {
            GameEvent::Shuffling => writeln!(self.output, " >>> Deck is being shuffled...")?,
            GameEvent::BlindIncrease(chips) => {
                writeln!(self.output, " >>> The big blind has increased to {chips}!")?;
                self.wait_enter()?;
            }
            GameEvent::Street { street, dealer } => {
                writeln!(self.output, " >>> {street}: {} is the dealer", name(*dealer))?
            }
            GameEvent::Blind {
                player,
                big,
                all_in,
            } => {
                let size = if *big { "big" } else { "small" };
                writeln!(self.output, " >>> {} bet the {size} blind", name(*player))?;
                if *all_in {
                    writeln!(self.output, " >>> {} went all-in!", name(*player))?;
                }
            }
            GameEvent::Move { player, mv, bet } => match mv {
                BettingMove::Check | BettingMove::Fold | BettingMove::AllIn => {
                    writeln!(self.output, " >>> {} {}", name(*player), mv.past_label())?
                }
                BettingMove::Raise => {
                    writeln!(self.output, " >>> {} raised to {bet}", name(*player))?
                }
                BettingMove::Bet | BettingMove::Call => {
                    writeln!(self.output, " >>> {} {} {bet}", name(*player), mv.past_label())?
                }
            },
            GameEvent::WinByFold { player, amount } => {
                writeln!(self.output, " >>> All other players folded...")?;
                writeln!(self.output, " >>> {} won {amount}!", name(*player))?;
                self.wait_enter()?;
            }
            GameEvent::Uncontested { player, payout } => {
                writeln!(
                    self.output,
                    " >>> {} is the only player left for {}, won {}",
                    name(*player),
                    Self::pot_label(payout.pot),
                    payout.share
                )?;
                self.wait_enter()?;
            }
            GameEvent::Showdown { showdown, payout } => {
                writeln!(self.output, " >>> Showdown for {}", Self::pot_label(payout.pot))?;
                for hand in showdown.hands() {
                    write!(self.output, "{:>12}  ", name(hand.player))?;
                    self.print_cards(hand.best.cards())?;

                    let mut label = hand.best.label().to_string();
                    if let Some(subtype) = &hand.subtype {
                        label = format!("{label}, {subtype}");
                    }

                    if hand.is_winner {
                        let text = format!("<{label}>  WINNER");
                        queue!(self.output, style::PrintStyledContent(text.green()))?;
                    } else {
                        write!(self.output, "<{label}>")?;
                    }

                    if let Some(kicker) = hand.kicker {
                        write!(self.output, "  kicker ")?;
                        self.print_card(&kicker)?;
                    }

                    writeln!(self.output)?;
                }

                let verb = if showdown.is_split() { "split" } else { "won" };
                let names = showdown
                    .winners()
                    .into_iter()
                    .map(name)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(
                    self.output,
                    "\n >>> {names} {verb} {} ({} each)",
                    Self::pot_label(payout.pot),
                    payout.share
                )?;

                if payout.remainder > Chips::ZERO {
                    writeln!(self.output, " >>> {} chips could not be split", payout.remainder)?;
                }

                self.wait_enter()?;
            }
            GameEvent::PlayerOut(player) => {
                writeln!(self.output, " >>> {} is out of chips", name(*player))?
            }
            GameEvent::GameOver { winners } => {
                let mut ranked = players.iter().collect::<Vec<_>>();
                ranked.sort_by(|a, b| b.chips.cmp(&a.chips));
                for p in ranked {
                    writeln!(self.output, "{:>20}  Chips: {:>9}", p.name, p.chips.to_string())?;
                }

                let names = winners.iter().map(|id| name(*id)).collect::<Vec<_>>();
                writeln!(self.output, "\n >>> {} won the game!", names.join(" and "))?;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn human_move(&mut self, player: &Player, spot: &Spot) -> Result<BettingMove> {
        let options = spot
            .legal_moves()
            .iter()
            .map(|mv| match mv {
                BettingMove::Call => format!("(c)all {}", spot.to_call()),
                BettingMove::Check => "(c)heck".to_string(),
                BettingMove::Bet => format!("(b)et {}", spot.to_raise()),
                BettingMove::Raise => format!("(r)aise {}", spot.to_raise()),
                BettingMove::AllIn => format!("(a)ll-in {}", spot.chips),
                BettingMove::Fold => "(f)old".to_string(),
            })
            .collect::<Vec<_>>()
            .join("  ");

        loop {
            write!(self.output, "{}, your move: {options}    ", player.name)?;
            self.output.flush()?;

            let line = self.read_line()?;
            match parse_move(&line, spot) {
                Some(mv) => return Ok(mv),
                None => writeln!(self.output, "Invalid move {line:?}")?,
            }
        }
    }

    fn continue_playing(&mut self) -> Result<bool> {
        write!(
            self.output,
            "Continue on to next hand? Press (enter) to continue or (n) to stop.   "
        )?;
        self.output.flush()?;

        let line = self.read_line()?;
        Ok(!line.to_ascii_lowercase().contains('n'))
    }
}
