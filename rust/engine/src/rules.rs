use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::GameError;
use crate::game::RoundState;
use crate::player::PlayerAction as A;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips needed to call, already capped at the stack
    Call(u32),
    /// New street total
    Bet(u32),
    /// New street total ("raise to")
    Raise(u32),
    /// Whole remaining stack
    AllIn(u32),
}

/// Legal moves for one seat, derived on demand from the round state.
///
/// Sized actions carry inclusive bounds; an unavailable sized action has
/// `min == max == 0`. `min_bet`/`max_bet` and `min_raise`/`max_raise` are
/// street totals, not increments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub can_fold: bool,
    pub can_check: bool,
    pub call_amount: u32,
    pub min_bet: u32,
    pub max_bet: u32,
    pub min_raise: u32,
    pub max_raise: u32,
    pub all_in_amount: u32,
}

impl LegalActions {
    /// Nothing available: folded or all-in seats, or a seat out of range.
    pub fn none() -> Self {
        Self::default()
    }

    /// Computes the legality set for `seat`.
    ///
    /// Raising needs the player to reach `current_bet + max(min_raise, big_blind)`
    /// and is closed for a player who already acted since the last full
    /// bet/raise (a short all-in does not re-open betting). A closed player
    /// may still go all-in if that is no more than a call.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdsim_engine::config::TableConfig;
    /// use holdsim_engine::engine::Engine;
    /// use holdsim_engine::player::Player;
    ///
    /// let mut engine = Engine::new(TableConfig::default(), Some(7));
    /// let state = engine
    ///     .new_hand(vec![Player::new(0, 1000), Player::new(1, 1000)])
    ///     .unwrap();
    /// // heads-up: the button posted the small blind and acts first
    /// let legal = state.legal_actions(state.to_act());
    /// assert_eq!(legal.call_amount, 10);
    /// assert_eq!((legal.min_raise, legal.max_raise), (40, 1000));
    /// ```
    pub fn for_seat(state: &RoundState, seat: usize) -> Self {
        let Some(player) = state.players().get(seat) else {
            return Self::none();
        };
        if !player.can_act() {
            return Self::none();
        }
        let stack = player.stack();
        let committed = player.street_contribution();
        let to_call = state.current_bet().saturating_sub(committed);
        let big_blind = state.config().big_blind;

        let mut legal = Self {
            can_fold: true,
            can_check: to_call == 0,
            call_amount: to_call.min(stack),
            all_in_amount: stack,
            ..Self::none()
        };

        if state.current_bet() == 0 {
            legal.min_bet = big_blind;
            legal.max_bet = stack;
        } else if state.has_acted_since_reopen(seat) {
            if stack > to_call {
                legal.all_in_amount = 0;
            }
        } else {
            let increment = state.min_raise().max(big_blind);
            let min_to = state.current_bet() + increment;
            let max_to = committed + stack;
            if min_to <= max_to {
                legal.min_raise = min_to;
                legal.max_raise = max_to;
            }
        }
        trace!(seat, ?legal, "legal actions");
        legal
    }

    pub fn can_call(&self) -> bool {
        self.call_amount > 0
    }

    pub fn can_bet(&self) -> bool {
        self.min_bet > 0 && self.max_bet >= self.min_bet
    }

    pub fn can_raise(&self) -> bool {
        self.min_raise > 0 && self.max_raise >= self.min_raise
    }

    pub fn can_all_in(&self) -> bool {
        self.all_in_amount > 0
    }

    pub fn is_empty(&self) -> bool {
        self.available().is_empty()
    }

    pub fn available(&self) -> Vec<A> {
        let mut v = Vec::with_capacity(6);
        if self.can_fold {
            v.push(A::Fold);
        }
        if self.can_check {
            v.push(A::Check);
        }
        if self.can_call() {
            v.push(A::Call);
        }
        if self.can_bet() {
            v.push(A::Bet);
        }
        if self.can_raise() {
            v.push(A::Raise);
        }
        if self.can_all_in() {
            v.push(A::AllIn);
        }
        v
    }

    /// Validates `action` with `amount` against this set.
    ///
    /// `amount` is only read for bet and raise, where it is the new street
    /// total.
    ///
    /// # Errors
    ///
    /// - [`GameError::IllegalAction`] if the action type is not available
    /// - [`GameError::AmountOutOfRange`] if a bet/raise total is outside its bounds
    pub fn validate(&self, action: A, amount: u32) -> Result<ValidatedAction, GameError> {
        let illegal = |reason: String| GameError::IllegalAction { action, reason };
        match action {
            A::Fold => {
                if self.can_fold {
                    Ok(ValidatedAction::Fold)
                } else {
                    Err(illegal("player cannot act".into()))
                }
            }
            A::Check => {
                if self.can_check {
                    Ok(ValidatedAction::Check)
                } else {
                    Err(illegal(format!("facing a bet, {} to call", self.call_amount)))
                }
            }
            A::Call => {
                if self.can_call() {
                    Ok(ValidatedAction::Call(self.call_amount))
                } else {
                    Err(illegal("nothing to call".into()))
                }
            }
            A::Bet => {
                if !self.can_bet() {
                    let reason = if self.min_bet == 0 {
                        "betting is already open, raise instead"
                    } else {
                        "stack is below the minimum bet, go all-in instead"
                    };
                    return Err(illegal(reason.into()));
                }
                if amount < self.min_bet || amount > self.max_bet {
                    return Err(GameError::AmountOutOfRange {
                        action,
                        amount,
                        min: self.min_bet,
                        max: self.max_bet,
                    });
                }
                Ok(ValidatedAction::Bet(amount))
            }
            A::Raise => {
                if !self.can_raise() {
                    return Err(illegal("raising is not available".into()));
                }
                if amount < self.min_raise || amount > self.max_raise {
                    return Err(GameError::AmountOutOfRange {
                        action,
                        amount,
                        min: self.min_raise,
                        max: self.max_raise,
                    });
                }
                Ok(ValidatedAction::Raise(amount))
            }
            A::AllIn => {
                if self.can_all_in() {
                    Ok(ValidatedAction::AllIn(self.all_in_amount))
                } else {
                    Err(illegal("all-in is not available".into()))
                }
            }
        }
    }
}
