use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::hand::HandValue;
use crate::player::{PlayerAction, PlayerId};
use crate::rules::LegalActions;
use crate::snapshot::PlayerView;

/// Outcome of a settled hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// Winning player ids in seat order
    pub winners: Vec<PlayerId>,
    /// Chips awarded per winner; sums to `pot`
    pub payouts: BTreeMap<PlayerId, u32>,
    /// Best hand of every live player (empty when uncontested)
    pub hand_values: BTreeMap<PlayerId, HandValue>,
    pub went_to_showdown: bool,
    pub pot: u32,
}

impl HandResult {
    pub fn is_winner(&self, id: PlayerId) -> bool {
        self.winners.contains(&id)
    }

    pub fn payout(&self, id: PlayerId) -> u32 {
        self.payouts.get(&id).copied().unwrap_or(0)
    }
}

/// Records a single processed action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The betting street when this action occurred
    pub street: Street,
    pub player_id: PlayerId,
    pub action: PlayerAction,
    /// Chips moved by the action
    pub amount: u32,
    pub pot_after: u32,
}

/// Complete record of a hand: seats as dealt, hole cards, board, every
/// action and the outcome. Kept in memory; serializable with serde_json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandHistory {
    pub hand_number: u64,
    /// Seed of this hand's deck (enables deterministic replay)
    pub seed: Option<u64>,
    pub button: usize,
    /// Players before antes and blinds
    pub players: Vec<PlayerView>,
    pub hole_cards: BTreeMap<PlayerId, Vec<Card>>,
    pub board: Vec<Card>,
    pub actions: Vec<HistoryEntry>,
    #[serde(default)]
    pub result: Option<HandResult>,
}

impl HandHistory {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Something that happened during a hand, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandEvent {
    HandStarted { hand_number: u64, button: usize },
    PlayerTurn { player_id: PlayerId, legal: LegalActions },
    ActionTaken {
        player_id: PlayerId,
        action: PlayerAction,
        amount: u32,
        pot_after: u32,
    },
    StreetDealt { street: Street, cards: Vec<Card> },
    Showdown { revealed: Vec<(PlayerId, Vec<Card>)> },
    HandEnded(HandResult),
}

/// Receives hand events after each committed transition.
pub trait HandObserver {
    fn on_event(&mut self, event: &HandEvent);
}

impl<F: FnMut(&HandEvent)> HandObserver for F {
    fn on_event(&mut self, event: &HandEvent) {
        self(event)
    }
}
