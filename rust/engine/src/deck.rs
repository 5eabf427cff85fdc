use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Ordered 52-card source for one hand, shuffled with a seeded ChaCha20 RNG.
///
/// Cards are drawn from the top (`position`) downwards. Every drawn card is
/// either dealt or burned, so `dealt + burned + remaining == 52` holds at all
/// times.
///
/// # Examples
///
/// ```
/// use holdsim_engine::deck::Deck;
///
/// let mut a = Deck::new_with_seed(42);
/// let mut b = Deck::new_with_seed(42);
/// assert_eq!(a.deal(5).unwrap(), b.deal(5).unwrap());
/// assert_eq!(a.remaining(), 47);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    dealt: Vec<Card>,
    burned: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Creates a deck shuffled from `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: full_deck(),
            position: 0,
            dealt: Vec::new(),
            burned: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.cards.shuffle(&mut deck.rng);
        deck
    }

    /// Builds a deck whose first cards are `top` in the given order, followed
    /// by the rest of the 52 cards in canonical order. Used to force a deal.
    pub fn stacked(top: &[Card]) -> Result<Self, GameError> {
        let mut seen = 0u64;
        for &c in top {
            if seen & c.bit() != 0 {
                return Err(GameError::DuplicateCard(c));
            }
            seen |= c.bit();
        }
        let mut cards = top.to_vec();
        cards.extend(full_deck().into_iter().filter(|c| seen & c.bit() == 0));
        Ok(Self {
            cards,
            position: 0,
            dealt: Vec::new(),
            burned: 0,
            rng: ChaCha20Rng::seed_from_u64(0),
        })
    }

    /// Restores all 52 cards, reshuffles and forgets the dealt history.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
        self.dealt.clear();
        self.burned = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = *self.cards.get(self.position)?;
        self.position += 1;
        self.dealt.push(c);
        Some(c)
    }

    /// Deals `n` cards or none at all.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.remaining() {
            return Err(GameError::InsufficientCards {
                needed: n,
                available: self.remaining(),
            });
        }
        Ok((0..n).filter_map(|_| self.deal_card()).collect())
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        if self.remaining() == 0 {
            return Err(GameError::InsufficientCards {
                needed: 1,
                available: 0,
            });
        }
        self.position += 1;
        self.burned += 1;
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn dealt_cards(&self) -> &[Card] {
        &self.dealt
    }

    pub fn burned(&self) -> usize {
        self.burned
    }
}
