use std::collections::BTreeMap;

use holdsim_engine::agent::Agent;
use holdsim_engine::cards::parse_cards;
use holdsim_engine::config::TableConfig;
use holdsim_engine::deck::Deck;
use holdsim_engine::engine::Engine;
use holdsim_engine::errors::GameError;
use holdsim_engine::game::Street;
use holdsim_engine::player::{Player, PlayerAction as A, PlayerId};
use holdsim_engine::rules::LegalActions;
use holdsim_engine::snapshot::RoundSnapshot;

struct CheckCall;

impl Agent for CheckCall {
    fn name(&self) -> &str {
        "CheckCall"
    }

    fn decide(&mut self, _view: &RoundSnapshot, legal: &LegalActions) -> (A, u32) {
        if legal.can_check {
            (A::Check, 0)
        } else {
            (A::Call, legal.call_amount)
        }
    }
}

fn seats(stacks: &[u32]) -> Vec<Player> {
    stacks
        .iter()
        .enumerate()
        .map(|(id, &s)| Player::new(id, s))
        .collect()
}

fn check_callers(n: usize) -> BTreeMap<PlayerId, Box<dyn Agent>> {
    (0..n).map(|id| (id, Box::new(CheckCall) as Box<dyn Agent>)).collect()
}

#[test]
fn heads_up_check_call_reaches_showdown() {
    let mut eng = Engine::new(TableConfig::default(), Some(99));
    eng.new_hand(seats(&[1000, 1000])).unwrap();
    let result = eng.play_hand(&mut check_callers(2)).unwrap();

    let state = eng.state().unwrap();
    assert_eq!(state.street(), Street::Showdown);
    assert_eq!(state.board().len(), 5);
    let contributed: u32 = state.players().iter().map(|p| p.hand_contribution()).sum();
    assert_eq!(state.pot(), contributed);
    assert_eq!(state.pot(), 40);
    assert!(result.went_to_showdown);
    assert_eq!(result.payouts.values().sum::<u32>(), 40);
    assert_eq!(result.hand_values.len(), 2);
    let total: u32 = state.players().iter().map(|p| p.stack()).sum();
    assert_eq!(total, 2000);
    // 4 hole cards, 3 burns, 5 board
    assert_eq!(eng.deck_remaining(), Some(40));
}

#[test]
fn fold_wins_uncontested() {
    let mut eng = Engine::new(TableConfig::default(), Some(5));
    eng.new_hand(seats(&[1000, 1000])).unwrap();
    eng.process_action(0, A::Fold, 0).unwrap();
    let state = eng.state().unwrap();
    assert!(state.is_hand_complete());
    assert!(state.board().is_empty());
    assert_eq!(state.players()[0].stack(), 990);
    assert_eq!(state.players()[1].stack(), 1010);
    let result = eng.result().unwrap();
    assert_eq!(result.winners, vec![1]);
    assert_eq!(result.payout(1), 30);
    assert!(!result.went_to_showdown);
    assert!(result.hand_values.is_empty());
}

#[test]
fn heads_up_positions() {
    let mut eng = Engine::new(TableConfig::default(), Some(5));
    eng.new_hand(seats(&[1000, 1000])).unwrap();
    let state = eng.state().unwrap();
    assert_eq!(state.button(), 0);
    assert_eq!(state.small_blind_seat(), 0);
    assert_eq!(state.big_blind_seat(), 1);
    assert_eq!(state.to_act(), 0);

    eng.process_action(0, A::Call, 0).unwrap();
    eng.process_action(1, A::Check, 0).unwrap();
    // postflop the big blind acts first
    assert_eq!(eng.state().unwrap().to_act(), 1);
}

#[test]
fn three_handed_positions() {
    let mut eng = Engine::new(TableConfig::default(), Some(5));
    eng.new_hand(seats(&[1000, 1000, 1000])).unwrap();
    let state = eng.state().unwrap();
    assert_eq!(state.small_blind_seat(), 1);
    assert_eq!(state.big_blind_seat(), 2);
    assert_eq!(state.to_act(), 0);
    assert_eq!(state.players()[1].street_contribution(), 10);
    assert_eq!(state.players()[2].street_contribution(), 20);

    eng.process_action(0, A::Call, 0).unwrap();
    eng.process_action(1, A::Call, 0).unwrap();
    eng.process_action(2, A::Check, 0).unwrap();
    let state = eng.state().unwrap();
    assert_eq!(state.street(), Street::Flop);
    assert_eq!(state.board().len(), 3);
    assert_eq!(state.to_act(), 1);
    assert_eq!(state.current_bet(), 0);
    assert!(state.players().iter().all(|p| p.street_contribution() == 0));
}

#[test]
fn folded_players_are_skipped() {
    let mut eng = Engine::new(TableConfig::default(), Some(5));
    eng.new_hand(seats(&[1000, 1000, 1000])).unwrap();
    eng.process_action(0, A::Call, 0).unwrap();
    eng.process_action(1, A::Fold, 0).unwrap();
    eng.process_action(2, A::Check, 0).unwrap();
    let state = eng.state().unwrap();
    assert_eq!(state.street(), Street::Flop);
    // seat 1 folded, so seat 2 opens the flop
    assert_eq!(state.to_act(), 2);
    assert_eq!(state.in_hand_count(), 2);
}

#[test]
fn streets_advance_in_order() {
    let mut eng = Engine::new(TableConfig::default(), Some(8));
    eng.new_hand(seats(&[1000, 1000])).unwrap();
    eng.process_action(0, A::Call, 0).unwrap();
    eng.process_action(1, A::Check, 0).unwrap();
    for (street, board) in [(Street::Turn, 4), (Street::River, 5)] {
        eng.process_action(1, A::Check, 0).unwrap();
        eng.process_action(0, A::Check, 0).unwrap();
        let state = eng.state().unwrap();
        assert_eq!(state.street(), street);
        assert_eq!(state.board().len(), board);
    }
    eng.process_action(1, A::Bet, 100).unwrap();
    eng.process_action(0, A::Call, 0).unwrap();
    let state = eng.state().unwrap();
    assert_eq!(state.street(), Street::Showdown);
    assert_eq!(state.pot(), 240);
}

#[test]
fn all_in_preflop_runs_out_the_board() {
    let mut eng = Engine::new(TableConfig::default(), Some(21));
    eng.new_hand(seats(&[1000, 1000])).unwrap();
    eng.process_action(0, A::AllIn, 0).unwrap();
    eng.process_action(1, A::Call, 0).unwrap();
    let state = eng.state().unwrap();
    assert_eq!(state.street(), Street::Showdown);
    assert_eq!(state.board().len(), 5);
    assert_eq!(state.pot(), 2000);
    let result = eng.result().unwrap();
    assert!(result.went_to_showdown);
    assert_eq!(result.payouts.values().sum::<u32>(), 2000);
    let total: u32 = state.players().iter().map(|p| p.stack()).sum();
    assert_eq!(total, 2000);
}

#[test]
fn blinds_can_put_everyone_all_in() {
    let mut eng = Engine::new(TableConfig::default(), Some(21));
    eng.new_hand(seats(&[5, 15])).unwrap();
    let state = eng.state().unwrap();
    assert!(state.is_hand_complete());
    assert_eq!(state.board().len(), 5);
    assert_eq!(state.pot(), 20);
}

#[test]
fn rejects_bad_seating() {
    let mut eng = Engine::new(TableConfig::default(), Some(1));
    assert!(eng.new_hand(seats(&[1000])).is_err());
    assert!(eng.new_hand(seats(&[1000, 0])).is_err());
    assert!(eng.new_hand(vec![Player::new(3, 100), Player::new(3, 100)]).is_err());
    assert!(eng.state().is_none());
    assert_eq!(eng.hand_count(), 0);
}

#[test]
fn next_hand_rotates_button_and_keeps_stacks() {
    let mut eng = Engine::new(TableConfig::default(), Some(4));
    eng.new_hand(seats(&[1000, 1000, 1000])).unwrap();
    eng.process_action(0, A::Fold, 0).unwrap();
    eng.process_action(1, A::Fold, 0).unwrap();
    assert_eq!(eng.result().unwrap().winners, vec![2]);

    let state = eng.next_hand().unwrap();
    assert_eq!(state.hand_number(), 2);
    assert_eq!(state.button(), 1);
    assert_eq!(state.small_blind_seat(), 2);
    assert_eq!(state.big_blind_seat(), 0);
    // stacks carried over minus the new blinds
    let stacks: Vec<u32> = state.players().iter().map(|p| p.stack()).collect();
    assert_eq!(stacks, vec![980, 990, 1000]);
    assert_eq!(state.to_act(), 1);
}

#[test]
fn next_hand_without_previous_hand_fails() {
    let mut eng = Engine::new(TableConfig::default(), Some(4));
    assert!(eng.next_hand().is_err());
}

#[test]
fn unsettled_hand_cannot_be_replaced() {
    let mut eng = Engine::new(TableConfig::default(), Some(4));
    eng.new_hand(seats(&[1000, 1000])).unwrap();
    eng.process_action(0, A::Raise, 500).unwrap();

    assert_eq!(eng.next_hand().unwrap_err(), GameError::HandInProgress);
    assert_eq!(
        eng.new_hand(seats(&[1000, 1000])).unwrap_err(),
        GameError::HandInProgress
    );
    let state = eng.state().unwrap();
    assert_eq!(state.pot(), 520);
    assert_eq!(state.hand_number(), 1);
    assert_eq!(eng.hand_count(), 1);

    eng.process_action(1, A::Fold, 0).unwrap();
    let state = eng.next_hand().unwrap();
    assert_eq!(state.hand_number(), 2);
    let total: u32 = state.players().iter().map(|p| p.stack()).sum();
    assert_eq!(total + state.pot(), 2000);
}

#[test]
fn button_passes_to_next_survivor_after_a_bust() {
    // seat 0 shoves 50 and loses; seats 1 and 2 split with aces and kings
    let order = parse_cards("2c Ah Ad 7d Kh Kd 3s Ac Kc 9s 4s 8h 5s Qd").unwrap();
    let mut eng = Engine::new(TableConfig::default(), Some(4));
    eng.new_hand_with_deck(seats(&[50, 1000, 1000]), Deck::stacked(&order).unwrap())
        .unwrap();
    assert_eq!(eng.state().unwrap().button(), 0);
    eng.process_action(0, A::AllIn, 0).unwrap();
    eng.process_action(1, A::Call, 0).unwrap();
    eng.process_action(2, A::Call, 0).unwrap();
    while !eng.state().unwrap().is_hand_complete() {
        let id = eng.state().unwrap().current_player().unwrap().id();
        eng.process_action(id, A::Check, 0).unwrap();
    }
    assert_eq!(eng.result().unwrap().winners, vec![1, 2]);

    let state = eng.next_hand().unwrap();
    let ids: Vec<PlayerId> = state.players().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![1, 2]);
    // player 1 sat after the old button, so it takes the button
    assert_eq!(state.players()[state.button()].id(), 1);
}
