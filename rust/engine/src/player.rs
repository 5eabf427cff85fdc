use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::TableConfig;

pub type PlayerId = usize;

/// The kind of move a player makes during a betting round.
///
/// The accompanying amount is interpreted per kind: ignored for fold, check,
/// call and all-in (the engine computes the chips), and the "raise to" /
/// "bet to" street total for bet and raise.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid if there is no bet to call)
    Check,
    /// Call the current bet, all-in if short
    Call,
    /// Open the betting on a street with no bet
    Bet,
    /// Raise the current bet to a new street total
    Raise,
    /// Commit all remaining chips
    AllIn,
}

/// Per-seat record: wallet, contributions, hole cards and status flags.
///
/// `stack` never goes negative and an all-in player always has an empty
/// stack. The stack survives [`Player::reset_for_new_hand`]; everything else
/// is cleared.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Player {
    id: PlayerId,
    name: String,
    stack: u32,
    hole: Vec<Card>,
    /// Chips committed on the current street
    street_contribution: u32,
    /// Chips committed over the whole hand
    hand_contribution: u32,
    folded: bool,
    all_in: bool,
    seat: usize,
}

impl Player {
    pub fn new(id: PlayerId, stack: u32) -> Self {
        Self {
            id,
            name: format!("Player {}", id),
            stack,
            hole: Vec::with_capacity(2),
            street_contribution: 0,
            hand_contribution: 0,
            folded: false,
            all_in: false,
            seat: 0,
        }
    }

    /// Player seated with the table's `starting_stack`.
    pub fn from_config(id: PlayerId, config: &TableConfig) -> Self {
        Self::new(id, config.starting_stack)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }
    pub fn street_contribution(&self) -> u32 {
        self.street_contribution
    }
    pub fn hand_contribution(&self) -> u32 {
        self.hand_contribution
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn seat(&self) -> usize {
        self.seat
    }

    /// Still competing for the pot.
    pub fn is_in_hand(&self) -> bool {
        !self.folded
    }

    /// Can still be asked for a decision.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && self.stack > 0
    }

    pub(crate) fn set_seat(&mut self, seat: usize) {
        self.seat = seat;
    }

    pub(crate) fn set_hole_cards(&mut self, cards: Vec<Card>) {
        self.hole = cards;
    }

    /// Moves up to `amount` chips out of the stack into this street's
    /// contribution. Returns the chips actually moved.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let moved = self.commit_dead(amount);
        self.street_contribution += moved;
        moved
    }

    /// Like [`Player::commit`] but does not count toward the street total
    /// (antes).
    pub fn commit_dead(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.hand_contribution += moved;
        if self.stack == 0 && moved > 0 {
            self.all_in = true;
        }
        moved
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    pub fn award(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub fn reset_for_new_street(&mut self) {
        self.street_contribution = 0;
    }

    pub fn reset_for_new_hand(&mut self) {
        self.hole.clear();
        self.street_contribution = 0;
        self.hand_contribution = 0;
        self.folded = false;
        self.all_in = false;
    }
}
