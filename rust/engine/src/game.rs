use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::TableConfig;
use crate::player::{Player, PlayerAction, PlayerId};
use crate::rules::LegalActions;
use crate::snapshot::{PlayerView, RoundSnapshot};

/// Represents a betting street in Texas Hold'em poker, plus the terminal
/// showdown phase. Streets only move forward within a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// Hand settled
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Community cards dealt when entering this street.
    pub fn cards_to_deal(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

/// One entry of the current street's action log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: PlayerId,
    pub seat: usize,
    pub action: PlayerAction,
    /// Chips moved into the pot by this action
    pub amount: u32,
    /// Player's street contribution after the action
    pub street_total: u32,
    /// A full bet or raise: everyone else must act again
    pub reopens: bool,
}

/// State of one hand in progress: the seats (owned by value and addressed by
/// index), board, pot, betting fields and the street's action log.
///
/// `pot` always equals the sum of every player's hand contribution, and
/// `current_bet` the largest street contribution among live seats.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub(crate) players: Vec<Player>,
    pub(crate) board: Vec<Card>,
    pub(crate) pot: u32,
    pub(crate) current_bet: u32,
    pub(crate) street: Street,
    pub(crate) button: usize,
    pub(crate) to_act: usize,
    /// Minimum raise increment
    pub(crate) min_raise: u32,
    pub(crate) last_aggressor: Option<usize>,
    pub(crate) actions: Vec<ActionRecord>,
    pub(crate) hand_number: u64,
    pub(crate) config: TableConfig,
}

impl RoundState {
    pub fn new(mut players: Vec<Player>, config: TableConfig, button: usize, hand_number: u64) -> Self {
        for (seat, p) in players.iter_mut().enumerate() {
            p.reset_for_new_hand();
            p.set_seat(seat);
        }
        let button = if players.is_empty() { 0 } else { button % players.len() };
        Self {
            players,
            board: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            street: Street::Preflop,
            button,
            to_act: button,
            min_raise: config.big_blind,
            last_aggressor: None,
            actions: Vec::new(),
            hand_number,
            config,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn to_act(&self) -> usize {
        self.to_act
    }
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }
    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }
    pub fn actions_this_street(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.to_act)
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Players who have not folded.
    pub fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    /// Players who can still make decisions.
    pub fn can_act_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    pub fn is_hand_complete(&self) -> bool {
        self.street == Street::Showdown
    }

    pub fn small_blind_seat(&self) -> usize {
        let n = self.players.len().max(1);
        if n == 2 {
            // heads-up: button posts the small blind
            self.button
        } else {
            (self.button + 1) % n
        }
    }

    pub fn big_blind_seat(&self) -> usize {
        let n = self.players.len().max(1);
        if n == 2 {
            (self.button + 1) % 2
        } else {
            (self.button + 2) % n
        }
    }

    /// First seat strictly after `from` (wrapping) that can act.
    pub fn next_active_seat(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|&seat| self.players[seat].can_act())
    }

    pub fn legal_actions(&self, seat: usize) -> LegalActions {
        LegalActions::for_seat(self, seat)
    }

    /// Index of the last full bet/raise in this street's log.
    fn anchor(&self) -> Option<usize> {
        self.actions.iter().rposition(|a| a.reopens)
    }

    /// Whether `seat` has acted since betting was last re-opened. The
    /// aggressor who re-opened it counts as having acted.
    pub fn has_acted_since_reopen(&self, seat: usize) -> bool {
        let start = match self.anchor() {
            Some(i) if self.actions[i].seat == seat => return true,
            Some(i) => i + 1,
            None => 0,
        };
        self.actions[start..].iter().any(|a| a.seat == seat)
    }

    pub fn is_betting_complete(&self) -> bool {
        if self.in_hand_count() <= 1 {
            return true;
        }
        self.players.iter().filter(|p| p.can_act()).all(|p| {
            p.street_contribution() >= self.current_bet && self.has_acted_since_reopen(p.seat())
        })
    }

    /// Plain view of the round. With a viewer, hole cards of every other
    /// seat are hidden.
    pub fn snapshot(&self, viewer: Option<PlayerId>) -> RoundSnapshot {
        RoundSnapshot {
            hand_number: self.hand_number,
            players: self
                .players
                .iter()
                .map(|p| PlayerView::of(p, viewer.map_or(true, |v| v == p.id())))
                .collect(),
            board: self.board.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            street: self.street,
            button: self.button,
            to_act: self.to_act,
            min_raise: self.min_raise,
            last_aggressor: self.last_aggressor,
            actions: self.actions.clone(),
            config: self.config.clone(),
        }
    }
}
