//! Fixed-policy agents.

use holdsim_engine::agent::Agent;
use holdsim_engine::player::PlayerAction;
use holdsim_engine::rules::LegalActions;
use holdsim_engine::snapshot::RoundSnapshot;

/// Never raises and never folds: check, else call, else all-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallStation;

impl Agent for CallStation {
    fn name(&self) -> &str {
        "CallStation"
    }

    fn decide(&mut self, _view: &RoundSnapshot, legal: &LegalActions) -> (PlayerAction, u32) {
        if legal.can_check {
            (PlayerAction::Check, 0)
        } else if legal.can_call() {
            (PlayerAction::Call, legal.call_amount)
        } else if legal.can_all_in() {
            (PlayerAction::AllIn, legal.all_in_amount)
        } else {
            (PlayerAction::Fold, 0)
        }
    }
}

/// Checks when free, folds otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldAgent;

impl Agent for FoldAgent {
    fn name(&self) -> &str {
        "FoldAgent"
    }

    fn decide(&mut self, _view: &RoundSnapshot, legal: &LegalActions) -> (PlayerAction, u32) {
        if legal.can_check {
            (PlayerAction::Check, 0)
        } else {
            (PlayerAction::Fold, 0)
        }
    }
}
