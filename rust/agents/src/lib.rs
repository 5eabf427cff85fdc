//! # holdsim-agents: Reference Decision-Makers
//!
//! Agents implementing [`holdsim_engine::agent::Agent`] and an explicit
//! registry that builds them by name.
//!
//! ## Core Components
//!
//! - [`AgentRegistry`] - Name-to-factory table, passed by value to whatever builds agents
//! - [`simple`] - `CallStation` and `FoldAgent`
//! - [`random`] - Seeded `RandomAgent`
//! - [`baseline`] - Rule-based `BaselineAgent`
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use holdsim_agents::AgentRegistry;
//! use holdsim_engine::agent::Agent;
//! use holdsim_engine::config::TableConfig;
//! use holdsim_engine::engine::Engine;
//! use holdsim_engine::player::Player;
//!
//! let registry = AgentRegistry::with_builtins();
//! let mut agents: BTreeMap<usize, Box<dyn Agent>> = BTreeMap::new();
//! agents.insert(0, registry.create("call", 1).unwrap());
//! agents.insert(1, registry.create("random", 2).unwrap());
//!
//! let mut engine = Engine::new(TableConfig::default(), Some(42));
//! engine
//!     .new_hand(vec![Player::new(0, 1000), Player::new(1, 1000)])
//!     .unwrap();
//! let result = engine.play_hand(&mut agents).unwrap();
//! assert_eq!(result.payouts.values().sum::<u32>(), result.pot);
//! ```

use std::collections::BTreeMap;

use holdsim_engine::agent::Agent;
use thiserror::Error;

pub mod baseline;
pub mod random;
pub mod simple;

pub use baseline::BaselineAgent;
pub use random::RandomAgent;
pub use simple::{CallStation, FoldAgent};

/// Builds an agent from a seed. Deterministic agents ignore it.
pub type AgentFactory = Box<dyn Fn(u64) -> Box<dyn Agent> + Send + Sync>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown agent type: {name} (available: {})", .available.join(", "))]
    UnknownAgent { name: String, available: Vec<String> },
}

/// Name-to-factory table for agents.
///
/// # Example
///
/// ```rust
/// use holdsim_agents::{AgentRegistry, FoldAgent};
///
/// let mut registry = AgentRegistry::new();
/// registry.register("fold", |_| Box::new(FoldAgent));
/// assert_eq!(registry.names(), vec!["fold"]);
/// assert!(registry.create("call", 0).is_err());
/// ```
#[derive(Default)]
pub struct AgentRegistry {
    factories: BTreeMap<String, AgentFactory>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `call`, `fold`, `random` and `baseline`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("call", |_| Box::new(CallStation));
        registry.register("fold", |_| Box::new(FoldAgent));
        registry.register("random", |seed| Box::new(RandomAgent::new(seed)));
        registry.register("baseline", |_| Box::new(BaselineAgent::new()));
        registry
    }

    /// Adds or replaces the factory for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(u64) -> Box<dyn Agent> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn create(&self, name: &str, seed: u64) -> Result<Box<dyn Agent>, RegistryError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory(seed)),
            None => Err(RegistryError::UnknownAgent {
                name: name.to_string(),
                available: self.factories.keys().cloned().collect(),
            }),
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
