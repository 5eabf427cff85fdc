use crate::cards::Card;
use crate::logger::HandResult;
use crate::player::{PlayerAction, PlayerId};
use crate::rules::LegalActions;
use crate::snapshot::RoundSnapshot;

/// A decision-maker seated at the table.
///
/// The engine calls [`Agent::decide`] exactly once per turn with a snapshot
/// in which other seats' hole cards are hidden. The returned amount is read
/// only for bet and raise (the new street total).
///
/// # Example Implementation
///
/// ```rust
/// use holdsim_engine::agent::Agent;
/// use holdsim_engine::player::PlayerAction;
/// use holdsim_engine::rules::LegalActions;
/// use holdsim_engine::snapshot::RoundSnapshot;
///
/// struct CheckFold;
///
/// impl Agent for CheckFold {
///     fn name(&self) -> &str {
///         "CheckFold"
///     }
///
///     fn decide(&mut self, _view: &RoundSnapshot, legal: &LegalActions) -> (PlayerAction, u32) {
///         if legal.can_check {
///             (PlayerAction::Check, 0)
///         } else {
///             (PlayerAction::Fold, 0)
///         }
///     }
/// }
/// ```
pub trait Agent {
    fn name(&self) -> &str;

    fn decide(&mut self, view: &RoundSnapshot, legal: &LegalActions) -> (PlayerAction, u32);

    /// Called once hole cards are dealt.
    fn on_hand_start(&mut self, _seat: usize, _hole_cards: &[Card]) {}

    /// Called after another player's action is applied.
    fn on_action(&mut self, _player_id: PlayerId, _action: PlayerAction, _amount: u32) {}

    fn on_hand_end(&mut self, _result: &HandResult) {}
}
