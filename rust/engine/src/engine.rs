use std::collections::BTreeMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::agent::Agent;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{ActionRecord, RoundState, Street};
use crate::hand::{HandEvaluator, HandValue};
use crate::logger::{HandEvent, HandHistory, HandObserver, HandResult, HistoryEntry};
use crate::player::{Player, PlayerAction, PlayerId};
use crate::rules::{LegalActions, ValidatedAction};
use crate::snapshot::{PlayerView, RoundSnapshot};

const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Game controller: drives one hand at a time through
/// `Preflop -> Flop -> Turn -> River -> Showdown`.
///
/// Each hand owns a fresh [`Deck`] seeded from the engine's ChaCha20
/// generator, so the same engine seed replays the same deals.
/// [`Engine::process_action`] either commits an action together with every
/// transition it triggers, or fails and leaves the hand untouched.
///
/// # Examples
///
/// ```
/// use holdsim_engine::config::TableConfig;
/// use holdsim_engine::engine::Engine;
/// use holdsim_engine::game::Street;
/// use holdsim_engine::player::{Player, PlayerAction};
///
/// let mut engine = Engine::new(TableConfig::default(), Some(12345));
/// engine
///     .new_hand(vec![Player::new(0, 1000), Player::new(1, 1000)])
///     .unwrap();
///
/// // heads-up: the button (seat 0) acts first preflop and folds
/// engine.process_action(0, PlayerAction::Fold, 0).unwrap();
///
/// let state = engine.state().unwrap();
/// assert_eq!(state.street(), Street::Showdown);
/// let result = engine.result().unwrap();
/// assert_eq!(result.winners, vec![1]);
/// assert!(!result.went_to_showdown);
/// ```
pub struct Engine {
    config: TableConfig,
    rng: ChaCha20Rng,
    hand_count: u64,
    hand: Option<Hand>,
    evaluator: HandEvaluator,
    observers: Vec<Box<dyn HandObserver>>,
}

/// Everything one hand owns. Cloned before each transition.
#[derive(Debug, Clone)]
struct Hand {
    state: RoundState,
    deck: Deck,
    history: HandHistory,
    result: Option<HandResult>,
}

impl Engine {
    pub fn new(config: TableConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        Self {
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
            hand_count: 0,
            hand: None,
            evaluator: HandEvaluator::default(),
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn HandObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn hand_count(&self) -> u64 {
        self.hand_count
    }

    pub fn state(&self) -> Option<&RoundState> {
        self.hand.as_ref().map(|h| &h.state)
    }

    pub fn history(&self) -> Option<&HandHistory> {
        self.hand.as_ref().map(|h| &h.history)
    }

    pub fn result(&self) -> Option<&HandResult> {
        self.hand.as_ref().and_then(|h| h.result.as_ref())
    }

    pub fn deck_remaining(&self) -> Option<usize> {
        self.hand.as_ref().map(|h| h.deck.remaining())
    }

    pub fn evaluator(&self) -> &HandEvaluator {
        &self.evaluator
    }

    /// Legality set of the player to act, or [`LegalActions::none`] when no
    /// hand is running.
    pub fn legal_actions(&self) -> LegalActions {
        match &self.hand {
            Some(h) if !h.state.is_hand_complete() => h.state.legal_actions(h.state.to_act),
            _ => LegalActions::none(),
        }
    }

    pub fn snapshot(&self, viewer: Option<PlayerId>) -> Option<RoundSnapshot> {
        self.state().map(|s| s.snapshot(viewer))
    }

    /// Starts a hand with a freshly shuffled deck. The button is seat
    /// `(hand_number - 1) % players`.
    ///
    /// # Errors
    ///
    /// [`GameError::HandInProgress`] while the current hand is unsettled,
    /// [`GameError::InvalidConfig`] for a table config that fails
    /// [`TableConfig::validate`], and the seating errors of a bad player list.
    pub fn new_hand(&mut self, players: Vec<Player>) -> Result<&RoundState, GameError> {
        self.check_players(&players)?;
        let button = self.rotating_button(players.len());
        let seed = self.rng.next_u64();
        self.start_hand(players, button, Deck::new_with_seed(seed), Some(seed))
    }

    /// Starts a hand dealing from `deck` as given (e.g. [`Deck::stacked`]).
    pub fn new_hand_with_deck(
        &mut self,
        players: Vec<Player>,
        deck: Deck,
    ) -> Result<&RoundState, GameError> {
        self.check_players(&players)?;
        let button = self.rotating_button(players.len());
        self.start_hand(players, button, deck, None)
    }

    /// Starts the next hand with the last hand's players and their current
    /// stacks. Players with no chips left are dropped.
    ///
    /// The button passes to the first player after the last button who still
    /// has chips, even when busted seats shift the seat indices.
    pub fn next_hand(&mut self) -> Result<&RoundState, GameError> {
        let state = self.state().ok_or(GameError::NoActiveHand)?;
        let players: Vec<Player> = state
            .players()
            .iter()
            .filter(|p| p.stack() > 0)
            .cloned()
            .collect();
        let n = state.num_players();
        let next_button = (1..=n)
            .map(|k| &state.players()[(state.button() + k) % n])
            .find(|p| p.stack() > 0)
            .map(Player::id);
        let button = next_button
            .and_then(|id| players.iter().position(|p| p.id() == id))
            .unwrap_or(0);

        self.check_players(&players)?;
        let seed = self.rng.next_u64();
        self.start_hand(players, button, Deck::new_with_seed(seed), Some(seed))
    }

    fn rotating_button(&self, seats: usize) -> usize {
        (self.hand_count % seats.max(1) as u64) as usize
    }

    fn check_players(&self, players: &[Player]) -> Result<(), GameError> {
        if self.hand.as_ref().is_some_and(|h| !h.state.is_hand_complete()) {
            return Err(GameError::HandInProgress);
        }
        self.config
            .validate()
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        let (min, max) = (self.config.min_players, self.config.max_players);
        if players.len() < min || players.len() > max {
            return Err(GameError::InvalidPlayerCount {
                count: players.len(),
                min,
                max,
            });
        }
        for (i, p) in players.iter().enumerate() {
            if p.stack() == 0 {
                return Err(GameError::EmptyStack(p.id()));
            }
            if players[..i].iter().any(|q| q.id() == p.id()) {
                return Err(GameError::DuplicatePlayer(p.id()));
            }
        }
        Ok(())
    }

    fn start_hand(
        &mut self,
        players: Vec<Player>,
        button: usize,
        deck: Deck,
        seed: Option<u64>,
    ) -> Result<&RoundState, GameError> {
        let hand_number = self.hand_count + 1;
        let state = RoundState::new(players, self.config.clone(), button, hand_number);
        let history = HandHistory {
            hand_number,
            seed,
            button,
            players: state.players().iter().map(|p| PlayerView::of(p, true)).collect(),
            hole_cards: BTreeMap::new(),
            board: Vec::new(),
            actions: Vec::new(),
            result: None,
        };
        let mut hand = Hand {
            state,
            deck,
            history,
            result: None,
        };
        let mut events = vec![HandEvent::HandStarted {
            hand_number,
            button,
        }];
        hand.start(&mut self.evaluator, &mut events)?;

        self.hand_count = hand_number;
        info!(
            hand = hand_number,
            button,
            players = hand.state.num_players(),
            pot = hand.state.pot,
            "hand started"
        );
        self.hand = Some(hand);
        self.emit(&events);
        self.state().ok_or(GameError::NoActiveHand)
    }

    /// Applies `action` for `player_id`, then advances the hand (next
    /// player, next street, or settlement).
    ///
    /// `amount` is the new street total for bet and raise and is ignored
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`GameError::NoActiveHand`], [`GameError::UnknownPlayer`],
    /// [`GameError::OutOfTurn`], [`GameError::IllegalAction`] or
    /// [`GameError::AmountOutOfRange`]. On error nothing changes.
    pub fn process_action(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
        amount: u32,
    ) -> Result<(), GameError> {
        let hand = match &self.hand {
            Some(h) if !h.state.is_hand_complete() => h,
            _ => return Err(GameError::NoActiveHand),
        };
        let mut next = hand.clone();
        let mut events = Vec::new();
        if let Err(e) = next.apply(player_id, action, amount, &mut self.evaluator, &mut events) {
            debug!(player = player_id, ?action, amount, error = %e, "action rejected");
            return Err(e);
        }
        self.hand = Some(next);
        self.emit(&events);
        Ok(())
    }

    /// Plays the current hand to the end, asking `agents` (keyed by player
    /// id) for every decision.
    ///
    /// An agent's illegal decision aborts the run with that error; the hand
    /// stays at the state before the rejected action.
    pub fn play_hand(
        &mut self,
        agents: &mut BTreeMap<PlayerId, Box<dyn Agent>>,
    ) -> Result<HandResult, GameError> {
        let state = self.state().ok_or(GameError::NoActiveHand)?;
        for p in state.players() {
            let agent = agents
                .get_mut(&p.id())
                .ok_or(GameError::UnknownPlayer(p.id()))?;
            agent.on_hand_start(p.seat(), p.hole_cards());
        }

        loop {
            let state = self.state().ok_or(GameError::NoActiveHand)?;
            if state.is_hand_complete() {
                break;
            }
            let seat = state.to_act();
            let id = state.players()[seat].id();
            let legal = state.legal_actions(seat);
            let view = state.snapshot(Some(id));
            let agent = agents.get_mut(&id).ok_or(GameError::UnknownPlayer(id))?;
            let (action, amount) = agent.decide(&view, &legal);

            let before = self.history().map_or(0, |h| h.actions.len());
            self.process_action(id, action, amount)?;
            let moved = self
                .history()
                .and_then(|h| h.actions.get(before))
                .map_or(0, |e| e.amount);
            for (pid, other) in agents.iter_mut() {
                if *pid != id {
                    other.on_action(id, action, moved);
                }
            }
        }

        let result = self.result().cloned().ok_or(GameError::NoActiveHand)?;
        for agent in agents.values_mut() {
            agent.on_hand_end(&result);
        }
        Ok(result)
    }

    fn emit(&mut self, events: &[HandEvent]) {
        for event in events {
            for observer in self.observers.iter_mut() {
                observer.on_event(event);
            }
        }
    }
}

impl Hand {
    /// Deals hole cards, posts antes and blinds, and finds the first actor.
    fn start(
        &mut self,
        evaluator: &mut HandEvaluator,
        events: &mut Vec<HandEvent>,
    ) -> Result<(), GameError> {
        let n = self.state.players.len();
        let needed = 2 * n;
        if self.deck.remaining() < needed {
            return Err(GameError::InsufficientCards {
                needed,
                available: self.deck.remaining(),
            });
        }
        // two passes in seat order
        let mut holes = vec![Vec::with_capacity(2); n];
        for _ in 0..2 {
            for hole in holes.iter_mut() {
                hole.extend(self.deck.deal(1)?);
            }
        }
        for (p, hole) in self.state.players.iter_mut().zip(holes) {
            self.history.hole_cards.insert(p.id(), hole.clone());
            p.set_hole_cards(hole);
        }

        let ante = self.state.config.ante;
        if ante > 0 {
            for p in self.state.players.iter_mut() {
                self.state.pot += p.commit_dead(ante);
            }
        }
        let (sb, bb) = (self.state.small_blind_seat(), self.state.big_blind_seat());
        let (sb_amount, bb_amount) = (self.state.config.small_blind, self.state.config.big_blind);
        self.state.pot += self.state.players[sb].commit(sb_amount);
        self.state.pot += self.state.players[bb].commit(bb_amount);
        self.state.current_bet = self
            .state
            .players
            .iter()
            .map(Player::street_contribution)
            .max()
            .unwrap_or(0);
        self.state.min_raise = bb_amount;

        let button = self.state.button;
        let first = if n == 2 && self.state.players[button].can_act() {
            Some(button)
        } else if n == 2 {
            self.state.next_active_seat(button)
        } else {
            self.state.next_active_seat(bb)
        };
        if let Some(seat) = first {
            self.state.to_act = seat;
        }
        if first.is_none() || self.betting_closed() {
            return self.run_out(evaluator, events);
        }
        self.push_turn(events);
        Ok(())
    }

    fn apply(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
        amount: u32,
        evaluator: &mut HandEvaluator,
        events: &mut Vec<HandEvent>,
    ) -> Result<(), GameError> {
        let state = &mut self.state;
        let seat = state
            .seat_of(player_id)
            .ok_or(GameError::UnknownPlayer(player_id))?;
        if seat != state.to_act {
            return Err(GameError::OutOfTurn {
                expected: state.players[state.to_act].id(),
                actual: player_id,
            });
        }
        let validated = state.legal_actions(seat).validate(action, amount)?;

        let bet_before = state.current_bet;
        let increment = state.min_raise.max(state.config.big_blind);
        let player = &mut state.players[seat];
        let (moved, reopens) = match validated {
            ValidatedAction::Fold => {
                player.fold();
                (0, false)
            }
            ValidatedAction::Check => (0, false),
            ValidatedAction::Call(chips) => (player.commit(chips), false),
            ValidatedAction::Bet(to) | ValidatedAction::Raise(to) => {
                let chips = to.saturating_sub(player.street_contribution());
                (player.commit(chips), true)
            }
            ValidatedAction::AllIn(chips) => {
                let moved = player.commit(chips);
                let total = player.street_contribution();
                // an all-in short of a full raise does not re-open betting
                let full = total > bet_before && (bet_before == 0 || total - bet_before >= increment);
                (moved, full)
            }
        };
        let total = player.street_contribution();
        state.pot += moved;
        if total > bet_before {
            if reopens {
                state.min_raise = total - bet_before;
            }
            state.current_bet = total;
            state.last_aggressor = Some(seat);
        }
        state.actions.push(ActionRecord {
            player_id,
            seat,
            action,
            amount: moved,
            street_total: total,
            reopens,
        });
        self.history.actions.push(HistoryEntry {
            street: state.street,
            player_id,
            action,
            amount: moved,
            pot_after: state.pot,
        });
        debug!(
            player = player_id,
            seat,
            ?action,
            moved,
            street_total = total,
            pot = state.pot,
            "action applied"
        );
        events.push(HandEvent::ActionTaken {
            player_id,
            action,
            amount: moved,
            pot_after: state.pot,
        });
        self.advance(evaluator, events)
    }

    /// Betting is over for this street, or nobody is left to bet against.
    fn betting_closed(&self) -> bool {
        let state = &self.state;
        state.is_betting_complete()
            || (state.can_act_count() <= 1
                && state
                    .players
                    .iter()
                    .filter(|p| p.can_act())
                    .all(|p| p.street_contribution() >= state.current_bet))
    }

    fn advance(
        &mut self,
        evaluator: &mut HandEvaluator,
        events: &mut Vec<HandEvent>,
    ) -> Result<(), GameError> {
        if self.state.in_hand_count() <= 1 {
            return self.settle(evaluator, events);
        }
        if self.betting_closed() {
            if self.state.street == Street::River {
                return self.settle(evaluator, events);
            }
            if self.state.can_act_count() <= 1 {
                return self.run_out(evaluator, events);
            }
            self.deal_street(events)?;
            return match self.state.next_active_seat(self.state.button) {
                Some(seat) => {
                    self.state.to_act = seat;
                    self.push_turn(events);
                    Ok(())
                }
                None => self.run_out(evaluator, events),
            };
        }
        match self.state.next_active_seat(self.state.to_act) {
            Some(seat) => {
                self.state.to_act = seat;
                self.push_turn(events);
                Ok(())
            }
            None => self.run_out(evaluator, events),
        }
    }

    fn push_turn(&self, events: &mut Vec<HandEvent>) {
        let seat = self.state.to_act;
        events.push(HandEvent::PlayerTurn {
            player_id: self.state.players[seat].id(),
            legal: self.state.legal_actions(seat),
        });
    }

    /// Burns one card and deals the next street.
    fn deal_street(&mut self, events: &mut Vec<HandEvent>) -> Result<(), GameError> {
        let street = self.state.street.next();
        self.deck.burn()?;
        let cards = self.deck.deal(street.cards_to_deal())?;
        let state = &mut self.state;
        state.board.extend_from_slice(&cards);
        for p in state.players.iter_mut() {
            p.reset_for_new_street();
        }
        state.current_bet = 0;
        state.min_raise = state.config.big_blind;
        state.last_aggressor = None;
        state.actions.clear();
        state.street = street;
        self.history.board = state.board.clone();
        debug!(?street, board = ?state.board, "street dealt");
        events.push(HandEvent::StreetDealt { street, cards });
        Ok(())
    }

    /// Deals the remaining streets without betting, then settles.
    fn run_out(
        &mut self,
        evaluator: &mut HandEvaluator,
        events: &mut Vec<HandEvent>,
    ) -> Result<(), GameError> {
        while self.state.street < Street::River {
            self.deal_street(events)?;
        }
        self.settle(evaluator, events)
    }

    /// Awards the pot. Ties split evenly; odd chips go one at a time to the
    /// winners in seat order.
    fn settle(
        &mut self,
        evaluator: &mut HandEvaluator,
        events: &mut Vec<HandEvent>,
    ) -> Result<(), GameError> {
        let live: Vec<usize> = (0..self.state.players.len())
            .filter(|&s| self.state.players[s].is_in_hand())
            .collect();
        let pot = self.state.pot;
        let mut hand_values: BTreeMap<PlayerId, HandValue> = BTreeMap::new();
        let went_to_showdown = live.len() > 1;

        let winners: Vec<usize> = if went_to_showdown {
            let mut values = Vec::with_capacity(live.len());
            for &seat in &live {
                let p = &self.state.players[seat];
                let value = evaluator.best_hand(p.hole_cards(), &self.state.board)?;
                hand_values.insert(p.id(), value);
                values.push((seat, value));
            }
            events.push(HandEvent::Showdown {
                revealed: live
                    .iter()
                    .map(|&s| {
                        let p = &self.state.players[s];
                        (p.id(), p.hole_cards().to_vec())
                    })
                    .collect(),
            });
            let best = values.iter().map(|&(_, v)| v).max();
            values
                .into_iter()
                .filter(|&(_, v)| Some(v) == best)
                .map(|(seat, _)| seat)
                .collect()
        } else {
            live
        };

        let mut payouts = BTreeMap::new();
        if !winners.is_empty() {
            let count = winners.len() as u32;
            let (share, remainder) = (pot / count, pot % count);
            for (i, &seat) in winners.iter().enumerate() {
                let amount = share + u32::from((i as u32) < remainder);
                let p = &mut self.state.players[seat];
                p.award(amount);
                payouts.insert(p.id(), amount);
            }
        }

        self.state.street = Street::Showdown;
        let result = HandResult {
            winners: winners.iter().map(|&s| self.state.players[s].id()).collect(),
            payouts,
            hand_values,
            went_to_showdown,
            pot,
        };
        info!(
            hand = self.state.hand_number,
            pot,
            winners = ?result.winners,
            showdown = went_to_showdown,
            "hand settled"
        );
        self.history.result = Some(result.clone());
        self.result = Some(result.clone());
        events.push(HandEvent::HandEnded(result));
        Ok(())
    }
}
