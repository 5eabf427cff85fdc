use holdsim_engine::agent::Agent;
use holdsim_engine::player::PlayerAction;
use holdsim_engine::rules::LegalActions;
use holdsim_engine::snapshot::RoundSnapshot;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Picks uniformly among the legal action kinds, then a uniform size within
/// the legal bounds for bet and raise. Never makes an illegal decision.
///
/// Folding is skipped when checking is free.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaCha20Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "RandomAgent"
    }

    fn decide(&mut self, _view: &RoundSnapshot, legal: &LegalActions) -> (PlayerAction, u32) {
        let mut choices = legal.available();
        if legal.can_check {
            choices.retain(|a| *a != PlayerAction::Fold);
        }
        let Some(&action) = choices.choose(&mut self.rng) else {
            return (PlayerAction::Fold, 0);
        };
        let amount = match action {
            PlayerAction::Bet => self.rng.random_range(legal.min_bet..=legal.max_bet),
            PlayerAction::Raise => self.rng.random_range(legal.min_raise..=legal.max_raise),
            PlayerAction::Call => legal.call_amount,
            PlayerAction::AllIn => legal.all_in_amount,
            PlayerAction::Fold | PlayerAction::Check => 0,
        };
        (action, amount)
    }
}
