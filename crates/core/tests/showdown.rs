// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pays side pots from showdown results.
use holdem_core::{BettingMove, Card, Chips, Player, PlayerId, Street, Table};
use holdem_eval::determine_showdown_winners;

fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}

fn seat(players: &mut [Player], seat: usize, hole: &str) {
    for card in cards(hole) {
        players[seat].deal(card);
    }
}

fn pay_pots(table: &mut Table, players: &mut [Player]) -> Vec<Vec<PlayerId>> {
    let board: [Card; 5] = table.community.as_slice().try_into().unwrap();
    let mut winners = Vec::new();

    for idx in (0..table.ledger().pots().len()).rev() {
        let pot = &table.ledger().pots()[idx];
        let contenders = players
            .iter()
            .filter(|p| !p.is_folded && pot.is_eligible(p.id))
            .map(|p| (p.id, p.hole().unwrap()))
            .collect::<Vec<_>>();

        let showdown = determine_showdown_winners(&contenders, &board).unwrap();
        table.award(idx, &showdown.winners(), players).unwrap();
        winners.push(showdown.winners());
    }

    winners
}

#[test]
fn short_stack_wins_main_pot_only() {
    let mut players = [100, 500, 500]
        .iter()
        .enumerate()
        .map(|(idx, c)| Player::new(PlayerId::new(idx as u8), format!("P{idx}"), Chips::new(*c)))
        .collect::<Vec<_>>();

    let mut table = Table::new(Chips::new(20));
    table.reset(players.iter().map(|p| p.id));

    seat(&mut players, 0, "Ah Ad");
    seat(&mut players, 1, "Kh Kd");
    seat(&mut players, 2, "7c 2d");

    table.start_street();
    table.take_bet(&mut players[0], BettingMove::AllIn).unwrap();
    table.update_raise_amount(Street::Preflop);
    table.take_bet(&mut players[1], BettingMove::Raise).unwrap();
    table.take_bet(&mut players[2], BettingMove::Call).unwrap();
    table.settle_street(&mut players).unwrap();

    for card in cards("2c 5h 9s Jd 3c") {
        table.deal_community(card);
    }

    let winners = pay_pots(&mut table, &mut players);

    // Side pot first, then the main pot.
    assert_eq!(winners, vec![vec![PlayerId::new(1)], vec![PlayerId::new(0)]]);
    assert_eq!(players[0].chips, Chips::new(300));
    assert_eq!(players[1].chips, Chips::new(380 + 40));
    assert_eq!(players[2].chips, Chips::new(380));

    let total = players.iter().map(|p| p.chips).sum::<Chips>();
    assert_eq!(total, Chips::new(1_100));
}

#[test]
fn split_pot_discards_odd_chip() {
    let mut players = (0..3)
        .map(|idx| Player::new(PlayerId::new(idx), format!("P{idx}"), Chips::new(200)))
        .collect::<Vec<_>>();

    let mut table = Table::new(Chips::new(2));
    table.reset(players.iter().map(|p| p.id));

    seat(&mut players, 0, "Ks 8h");
    seat(&mut players, 1, "Kd 6c");
    seat(&mut players, 2, "2s 3h");

    table.start_street();
    table.take_small_blind(&mut players[2]).unwrap();
    table.take_big_blind(&mut players[0]).unwrap();
    table.take_bet(&mut players[1], BettingMove::Call).unwrap();
    table.take_bet(&mut players[2], BettingMove::Fold).unwrap();
    table.take_bet(&mut players[0], BettingMove::Check).unwrap();
    table.settle_street(&mut players).unwrap();
    assert_eq!(table.ledger().total(), Chips::new(5));

    for card in cards("Kh Qc Tc 5s Jh") {
        table.deal_community(card);
    }

    let winners = pay_pots(&mut table, &mut players);
    assert_eq!(winners, vec![vec![PlayerId::new(0), PlayerId::new(1)]]);
    assert_eq!(players[0].chips, Chips::new(200));
    assert_eq!(players[1].chips, Chips::new(200));
    assert_eq!(players[2].chips, Chips::new(199));
}
