//! Rule-based reference agent.
//!
//! Scores the hand on a 0-10 scale (hole cards preflop, made-hand category
//! postflop) and maps the score plus pot odds to a deterministic decision.

use holdsim_engine::agent::Agent;
use holdsim_engine::cards::{Card, Rank};
use holdsim_engine::game::Street;
use holdsim_engine::hand::{best_hand, Category};
use holdsim_engine::player::PlayerAction;
use holdsim_engine::rules::LegalActions;
use holdsim_engine::snapshot::RoundSnapshot;

/// Deterministic rule-based agent.
///
/// **Preflop:** premium pairs and big aces raise, medium hands call cheap
/// bets, weak hands check or fold.
///
/// **Postflop:** two pair or better bets and calls, one pair calls small
/// bets, weaker hands give up unless the price is right.
#[derive(Debug, Clone, Default)]
pub struct BaselineAgent;

impl BaselineAgent {
    pub fn new() -> Self {
        Self
    }

    /// Preflop score: 10 for AA/KK/AKs down to 2 for weak offsuit cards.
    fn preflop_strength(c1: Card, c2: Card) -> u8 {
        let (r1, r2) = (c1.rank.value(), c2.rank.value());
        let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
        let suited = c1.suit == c2.suit;
        let bump = |s: u8| if suited { s + 1 } else { s };

        if high == low {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }
        match (high, low) {
            (14, 13) => {
                if suited {
                    10
                } else {
                    8
                }
            }
            (14, 12) => bump(7),
            (14, 11) | (13, 12) => bump(6),
            (14, 10) | (13, 11) | (12, 11) => bump(5),
            (14, _) | (13, 10) | (12, 10) => bump(4),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Postflop score from the best made hand; `None` before the flop.
    fn postflop_strength(hole: &[Card], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let value = best_hand(hole, board).ok()?;
        let base = match value.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        let kicker = u8::from(value.kickers[0] >= Rank::Queen.value());
        Some((base + kicker).min(10))
    }

    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn raise_to(view: &RoundSnapshot, legal: &LegalActions) -> u32 {
        (view.current_bet + view.pot / 2).clamp(legal.min_raise, legal.max_raise)
    }

    fn decide_unopened(strength: u8, view: &RoundSnapshot, legal: &LegalActions) -> (PlayerAction, u32) {
        match strength {
            9..=10 if legal.can_bet() => {
                let to = (view.pot * 2 / 3).clamp(legal.min_bet, legal.max_bet);
                (PlayerAction::Bet, to)
            }
            7..=8 if legal.can_bet() => {
                let to = (view.pot / 2).clamp(legal.min_bet, legal.max_bet);
                (PlayerAction::Bet, to)
            }
            // big blind option
            9..=10 if legal.can_raise() => (PlayerAction::Raise, Self::raise_to(view, legal)),
            _ => (PlayerAction::Check, 0),
        }
    }

    fn decide_facing_bet(
        strength: u8,
        view: &RoundSnapshot,
        legal: &LegalActions,
        stack: u32,
    ) -> (PlayerAction, u32) {
        let to_call = legal.call_amount;
        let call = (PlayerAction::Call, to_call);
        let fold = (PlayerAction::Fold, 0);

        if to_call >= stack {
            return if strength >= 7 { call } else { fold };
        }
        let pot_odds = Self::pot_odds(view.pot, to_call);
        match strength {
            9..=10 if legal.can_raise() => (PlayerAction::Raise, Self::raise_to(view, legal)),
            7..=10 => call,
            5..=6 if pot_odds >= 0.3 || to_call <= view.pot / 4 => call,
            3..=4 if pot_odds >= 0.4 || to_call <= view.pot / 6 => call,
            _ => fold,
        }
    }
}

impl Agent for BaselineAgent {
    fn name(&self) -> &str {
        "BaselineAgent"
    }

    fn decide(&mut self, view: &RoundSnapshot, legal: &LegalActions) -> (PlayerAction, u32) {
        let me = view.players.get(view.to_act);
        let hole = me.and_then(|p| p.hole_cards.as_deref()).unwrap_or(&[]);
        let &[c1, c2] = hole else {
            return if legal.can_check {
                (PlayerAction::Check, 0)
            } else {
                (PlayerAction::Fold, 0)
            };
        };

        let strength = match view.street {
            Street::Preflop => Self::preflop_strength(c1, c2),
            _ => Self::postflop_strength(hole, &view.board)
                .unwrap_or_else(|| Self::preflop_strength(c1, c2)),
        };

        if legal.can_check {
            Self::decide_unopened(strength, view, legal)
        } else {
            let stack = me.map_or(0, |p| p.stack);
            Self::decide_facing_bet(strength, view, legal, stack)
        }
    }
}
