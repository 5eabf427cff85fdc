use std::collections::BTreeMap;

use holdsim_engine::agent::Agent;
use holdsim_engine::cards::parse_cards;
use holdsim_engine::config::TableConfig;
use holdsim_engine::deck::Deck;
use holdsim_engine::engine::Engine;
use holdsim_engine::hand::Category;
use holdsim_engine::player::{Player, PlayerAction as A, PlayerId};
use holdsim_engine::rules::LegalActions;
use holdsim_engine::snapshot::RoundSnapshot;
use proptest::prelude::*;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn seats(n: usize, stack: u32) -> Vec<Player> {
    (0..n).map(|id| Player::new(id, stack)).collect()
}

fn check_down(eng: &mut Engine) {
    while !eng.state().unwrap().is_hand_complete() {
        let state = eng.state().unwrap();
        let id = state.current_player().unwrap().id();
        let legal = eng.legal_actions();
        let action = if legal.can_check { A::Check } else { A::Call };
        eng.process_action(id, action, 0).unwrap();
    }
}

#[test]
fn trips_beat_two_pair_with_forced_deck() {
    // hole cards go out in two passes, then burn/flop, burn/turn, burn/river
    let order = parse_cards("As Kd Ah Qd 9c Ks Qs Ac 8c 2d 7c 3h").unwrap();
    let mut eng = Engine::new(TableConfig::default(), None);
    eng.new_hand_with_deck(seats(2, 1000), Deck::stacked(&order).unwrap())
        .unwrap();
    check_down(&mut eng);

    let state = eng.state().unwrap();
    assert_eq!(state.board(), parse_cards("Ks Qs Ac 2d 3h").unwrap().as_slice());
    assert_eq!(state.players()[0].hole_cards(), parse_cards("As Ah").unwrap().as_slice());

    let result = eng.result().unwrap();
    assert_eq!(result.winners, vec![0]);
    assert_eq!(result.hand_values[&0].category, Category::ThreeOfAKind);
    assert_eq!(result.hand_values[&1].category, Category::TwoPair);
    assert_eq!(result.payout(0), 40);
    assert_eq!(state.players()[0].stack(), 1020);
    assert_eq!(state.players()[1].stack(), 980);
    assert_eq!(eng.history().unwrap().seed, None);
}

#[test]
fn odd_chip_goes_to_first_winner_in_seat_order() {
    let config = TableConfig {
        small_blind: 5,
        big_blind: 10,
        ..TableConfig::default()
    };
    // seats 0 and 2 both play a royal board
    let order = parse_cards("2c 4c 2d 3d 5d 3c 9h As Ks Qs 8h Js 7h Ts").unwrap();
    let mut eng = Engine::new(config, None);
    eng.new_hand_with_deck(seats(3, 1000), Deck::stacked(&order).unwrap())
        .unwrap();
    eng.process_action(0, A::Call, 0).unwrap();
    eng.process_action(1, A::Fold, 0).unwrap();
    check_down(&mut eng);

    let result = eng.result().unwrap();
    assert_eq!(result.pot, 25);
    assert_eq!(result.winners, vec![0, 2]);
    assert_eq!(result.payout(0), 13);
    assert_eq!(result.payout(2), 12);
    assert_eq!(result.payout(1), 0);
    let stacks: Vec<u32> = eng.state().unwrap().players().iter().map(|p| p.stack()).collect();
    assert_eq!(stacks, vec![1003, 995, 1002]);
}

#[test]
fn three_way_split_hands_out_the_odd_chip_in_seat_order() {
    let config = TableConfig {
        small_blind: 5,
        big_blind: 10,
        ..TableConfig::default()
    };
    // seats 0, 2 and 3 play a royal board; the small blind folds
    let order = parse_cards("2c 2d 3c 4c 5c 6d 7d 8d 9h As Ks Qs 8h Js 7h Ts").unwrap();
    let mut eng = Engine::new(config, None);
    eng.new_hand_with_deck(seats(4, 1000), Deck::stacked(&order).unwrap())
        .unwrap();
    eng.process_action(3, A::Call, 0).unwrap();
    eng.process_action(0, A::Call, 0).unwrap();
    eng.process_action(1, A::Fold, 0).unwrap();
    check_down(&mut eng);

    let result = eng.result().unwrap();
    assert_eq!(result.pot, 35);
    assert_eq!(result.winners, vec![0, 2, 3]);
    assert_eq!(result.payout(0), 12);
    assert_eq!(result.payout(2), 12);
    assert_eq!(result.payout(3), 11);
    assert_eq!(result.payouts.values().sum::<u32>(), 35);
    let stacks: Vec<u32> = eng.state().unwrap().players().iter().map(|p| p.stack()).collect();
    assert_eq!(stacks, vec![1002, 995, 1002, 1001]);
    assert_eq!(stacks.iter().sum::<u32>(), 4000);
}

#[test]
fn even_split_is_exact() {
    let order = parse_cards("2c 4c 3d 5d 9h As Ks Qs 8h Js 7h Ts").unwrap();
    let mut eng = Engine::new(TableConfig::default(), None);
    eng.new_hand_with_deck(seats(2, 1000), Deck::stacked(&order).unwrap())
        .unwrap();
    check_down(&mut eng);
    let result = eng.result().unwrap();
    assert_eq!(result.winners, vec![0, 1]);
    assert_eq!(result.payout(0), 20);
    assert_eq!(result.payout(1), 20);
}

#[test]
fn antes_go_in_before_blinds() {
    let config = TableConfig {
        ante: 5,
        ..TableConfig::default()
    };
    let mut eng = Engine::new(config, Some(3));
    eng.new_hand(seats(3, 1000)).unwrap();
    let state = eng.state().unwrap();
    assert_eq!(state.pot(), 45);
    assert_eq!(state.current_bet(), 20);
    let p = &state.players()[2];
    assert_eq!(p.street_contribution(), 20);
    assert_eq!(p.hand_contribution(), 25);
    assert_eq!(eng.legal_actions().call_amount, 20);
}

#[test]
fn short_blind_posts_what_it_has() {
    let mut eng = Engine::new(TableConfig::default(), Some(3));
    eng.new_hand(vec![Player::new(0, 1000), Player::new(1, 1000), Player::new(2, 12)])
        .unwrap();
    let state = eng.state().unwrap();
    assert!(state.players()[2].is_all_in());
    assert_eq!(state.current_bet(), 12);
    assert_eq!(state.pot(), 22);
    assert_eq!(eng.legal_actions().call_amount, 12);
}

/// Seeded agent that picks any legal action.
struct Chaos(ChaCha20Rng);

impl Agent for Chaos {
    fn name(&self) -> &str {
        "Chaos"
    }

    fn decide(&mut self, _view: &RoundSnapshot, legal: &LegalActions) -> (A, u32) {
        let choices = legal.available();
        let action = *choices.choose(&mut self.0).unwrap_or(&A::Fold);
        let amount = match action {
            A::Bet => self.0.random_range(legal.min_bet..=legal.max_bet),
            A::Raise => self.0.random_range(legal.min_raise..=legal.max_raise),
            _ => 0,
        };
        (action, amount)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chips_are_conserved(
        seed in any::<u64>(),
        stacks in prop::collection::vec(1u32..3000, 2..=6),
    ) {
        let players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(id, &s)| Player::new(id, s))
            .collect();
        let before: u32 = stacks.iter().sum();
        let mut eng = Engine::new(TableConfig::default(), Some(seed));
        eng.new_hand(players).unwrap();
        let mut agents: BTreeMap<PlayerId, Box<dyn Agent>> = (0..stacks.len())
            .map(|id| {
                let rng = ChaCha20Rng::seed_from_u64(seed ^ id as u64);
                (id, Box::new(Chaos(rng)) as Box<dyn Agent>)
            })
            .collect();
        let result = eng.play_hand(&mut agents).unwrap();

        let state = eng.state().unwrap();
        let contributed: u32 = state.players().iter().map(|p| p.hand_contribution()).sum();
        let after: u32 = state.players().iter().map(|p| p.stack()).sum();
        prop_assert_eq!(state.pot(), contributed);
        prop_assert_eq!(result.payouts.values().sum::<u32>(), result.pot);
        prop_assert_eq!(before, after);
        prop_assert!(!result.winners.is_empty());
        if result.went_to_showdown {
            prop_assert_eq!(state.board().len(), 5);
        }
    }
}
