use thiserror::Error;

use crate::cards::Card;
use crate::player::{PlayerAction, PlayerId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    OutOfTurn { expected: PlayerId, actual: PlayerId },
    #[error("Illegal action {action:?}: {reason}")]
    IllegalAction {
        action: PlayerAction,
        reason: String,
    },
    #[error("Amount {amount} for {action:?} outside [{min}, {max}]")]
    AmountOutOfRange {
        action: PlayerAction,
        amount: u32,
        min: u32,
        max: u32,
    },
    #[error("Insufficient cards: needed {needed}, available {available}")]
    InsufficientCards { needed: usize, available: usize },
    #[error("No hand in progress")]
    NoActiveHand,
    #[error("The current hand has not been settled")]
    HandInProgress,
    #[error("Invalid table config: {0}")]
    InvalidConfig(String),
    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("Duplicate card {0}")]
    DuplicateCard(Card),
    #[error("Invalid card text: {0:?}")]
    InvalidCard(String),
    #[error("Too many cards to evaluate: {count}")]
    TooManyCards { count: usize },
    #[error("Player {0} has no chips")]
    EmptyStack(PlayerId),
    #[error("Player {0} is seated twice")]
    DuplicatePlayer(PlayerId),
    #[error("Player count {count} outside [{min}, {max}]")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },
}
