//! # holdsim-engine: Single-Hand No-Limit Hold'em Simulator
//!
//! A deterministic No-Limit Texas Hold'em engine for 2 to 22 seats.
//! Provides card and deck primitives, a 5-to-7 card hand evaluator, and a
//! betting state machine that drives one hand from the blinds to settlement
//! with reproducible ChaCha20 shuffles.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Seeded 52-card deck with burn tracking
//! - [`hand`] - Hand evaluation, comparison and caching
//! - [`player`] - Player record, actions and chip movement
//! - [`rules`] - Legal action sets and action validation
//! - [`game`] - Round state, streets and the action log
//! - [`snapshot`] - Serializable views handed to agents
//! - [`engine`] - Game controller running a hand
//! - [`agent`] - Decision-maker trait
//! - [`logger`] - Hand history, results and observer events
//! - [`config`] - Table stakes loaded from TOML
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdsim_engine::cards::parse_cards;
//! use holdsim_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let value = evaluate(&cards).unwrap();
//! assert_eq!(value.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! The same engine seed deals the same cards:
//!
//! ```rust
//! use holdsim_engine::config::TableConfig;
//! use holdsim_engine::engine::Engine;
//! use holdsim_engine::player::Player;
//!
//! let seats = || vec![Player::new(0, 1000), Player::new(1, 1000)];
//! let mut a = Engine::new(TableConfig::default(), Some(42));
//! let mut b = Engine::new(TableConfig::default(), Some(42));
//! a.new_hand(seats()).unwrap();
//! b.new_hand(seats()).unwrap();
//! assert_eq!(a.history().unwrap().hole_cards, b.history().unwrap().hole_cards);
//! ```

pub mod agent;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod snapshot;
