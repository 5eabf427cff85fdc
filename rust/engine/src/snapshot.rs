//! Plain, serializable view of a round. This is the only game view handed
//! to agents.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::TableConfig;
use crate::game::{ActionRecord, Street};
use crate::player::{Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub seat: usize,
    pub stack: u32,
    /// `None` when hidden from the viewer
    pub hole_cards: Option<Vec<Card>>,
    pub street_contribution: u32,
    pub hand_contribution: u32,
    pub folded: bool,
    pub all_in: bool,
}

impl PlayerView {
    pub fn of(p: &Player, show_cards: bool) -> Self {
        Self {
            id: p.id(),
            name: p.name().to_string(),
            seat: p.seat(),
            stack: p.stack(),
            hole_cards: show_cards.then(|| p.hole_cards().to_vec()),
            street_contribution: p.street_contribution(),
            hand_contribution: p.hand_contribution(),
            folded: p.is_folded(),
            all_in: p.is_all_in(),
        }
    }
}

/// Field-for-field copy of a [`crate::game::RoundState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub hand_number: u64,
    pub players: Vec<PlayerView>,
    pub board: Vec<Card>,
    pub pot: u32,
    pub current_bet: u32,
    pub street: Street,
    pub button: usize,
    pub to_act: usize,
    pub min_raise: u32,
    pub last_aggressor: Option<usize>,
    pub actions: Vec<ActionRecord>,
    pub config: TableConfig,
}

impl RoundSnapshot {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
