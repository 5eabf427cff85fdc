use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// Totally ordered value of a five-card hand.
///
/// Compares by category, then by `kickers` left to right. Unused kicker
/// slots are zero, so hands of the same category always compare on the same
/// number of meaningful ranks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandValue {
    pub category: Category,
    // kickers: ordered by significance for tiebreaks
    pub kickers: [u8; 5],
}

impl HandValue {
    pub fn describe(&self) -> String {
        let name = |v: u8| Rank::from_u8(v).map(rank_name).unwrap_or("?");
        let k = self.kickers;
        match self.category {
            Category::HighCard => format!("High Card {}", name(k[0])),
            Category::OnePair => format!("Pair of {}s", name(k[0])),
            Category::TwoPair => format!("Two Pair, {}s and {}s", name(k[0]), name(k[1])),
            Category::ThreeOfAKind => format!("Three {}s", name(k[0])),
            Category::Straight => format!("Straight, {} high", name(k[0])),
            Category::Flush => format!("Flush, {} high", name(k[0])),
            Category::FullHouse => format!("Full House, {}s full of {}s", name(k[0]), name(k[1])),
            Category::FourOfAKind => format!("Four {}s", name(k[0])),
            Category::StraightFlush => format!("Straight Flush, {} high", name(k[0])),
            Category::RoyalFlush => "Royal Flush".to_string(),
        }
    }
}

fn rank_name(r: Rank) -> &'static str {
    match r {
        Rank::Two => "Two",
        Rank::Three => "Three",
        Rank::Four => "Four",
        Rank::Five => "Five",
        Rank::Six => "Six",
        Rank::Seven => "Seven",
        Rank::Eight => "Eight",
        Rank::Nine => "Nine",
        Rank::Ten => "Ten",
        Rank::Jack => "Jack",
        Rank::Queen => "Queen",
        Rank::King => "King",
        Rank::Ace => "Ace",
    }
}

/// Evaluates exactly five cards.
pub(crate) fn evaluate_five(cards: &[Card; 5]) -> HandValue {
    let mut ranks = [0u8; 5];
    for (r, c) in ranks.iter_mut().zip(cards.iter()) {
        *r = c.rank.value();
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let mut rank_counts = [0u8; 15]; // 2..14 used
    for &r in &ranks {
        rank_counts[r as usize] += 1;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high(&ranks, &rank_counts);

    // (count, rank) groups, biggest group first, then higher rank first
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let mut kickers = [0u8; 5];
    for (slot, &(_, r)) in kickers.iter_mut().zip(groups.iter()) {
        *slot = r;
    }

    let category = match (straight_high, flush) {
        (Some(14), true) => {
            return HandValue {
                category: Category::RoyalFlush,
                kickers: [14, 0, 0, 0, 0],
            }
        }
        (Some(high), true) => {
            return HandValue {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            }
        }
        _ => match (groups[0].0, groups.get(1).map_or(0, |g| g.0)) {
            (4, _) => Category::FourOfAKind,
            (3, 2) => Category::FullHouse,
            _ if flush => Category::Flush,
            _ if straight_high.is_some() => Category::Straight,
            (3, _) => Category::ThreeOfAKind,
            (2, 2) => Category::TwoPair,
            (2, _) => Category::OnePair,
            _ => Category::HighCard,
        },
    };

    if category == Category::Straight {
        kickers = [straight_high.unwrap_or(0), 0, 0, 0, 0];
    }
    HandValue { category, kickers }
}

/// Straight high card for five descending ranks; the wheel (A-2-3-4-5) is
/// five high.
fn straight_high(desc: &[u8; 5], rank_counts: &[u8; 15]) -> Option<u8> {
    if rank_counts.iter().any(|&c| c > 1) {
        return None;
    }
    if desc[0] - desc[4] == 4 {
        return Some(desc[0]);
    }
    if *desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

/// Evaluates 5 to 7 cards: the best value over every five-card subset.
///
/// # Errors
///
/// - [`GameError::InsufficientCards`] for fewer than five cards
/// - [`GameError::TooManyCards`] for more than seven
/// - [`GameError::DuplicateCard`] if a card appears twice
pub fn evaluate(cards: &[Card]) -> Result<HandValue, GameError> {
    best_of_subsets(cards, evaluate_five)
}

/// Best hand from hole cards plus board.
pub fn best_hand(hole: &[Card], board: &[Card]) -> Result<HandValue, GameError> {
    let all: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
    evaluate(&all)
}

pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn check_cards(cards: &[Card]) -> Result<(), GameError> {
    if cards.len() < 5 {
        return Err(GameError::InsufficientCards {
            needed: 5,
            available: cards.len(),
        });
    }
    if cards.len() > 7 {
        return Err(GameError::TooManyCards { count: cards.len() });
    }
    let mut seen = 0u64;
    for &c in cards {
        if seen & c.bit() != 0 {
            return Err(GameError::DuplicateCard(c));
        }
        seen |= c.bit();
    }
    Ok(())
}

fn best_of_subsets<F>(cards: &[Card], mut eval5: F) -> Result<HandValue, GameError>
where
    F: FnMut(&[Card; 5]) -> HandValue,
{
    check_cards(cards)?;
    let n = cards.len();
    let mut best: Option<HandValue> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let v = eval5(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        match best {
                            Some(cur) if cur >= v => {}
                            _ => best = Some(v),
                        }
                    }
                }
            }
        }
    }
    best.ok_or(GameError::InsufficientCards {
        needed: 5,
        available: n,
    })
}

pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Bounded memo of five-card evaluations keyed by the 52-bit card mask.
///
/// Eviction: when an insert would exceed `capacity`, the whole table is
/// cleared first. Results never depend on cache contents.
#[derive(Debug, Clone)]
pub struct EvalCache {
    map: HashMap<u64, HandValue>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl EvalCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    fn get_or_eval(&mut self, cards: &[Card; 5]) -> HandValue {
        let key = cards.iter().fold(0u64, |m, c| m | c.bit());
        if let Some(v) = self.map.get(&key) {
            self.hits += 1;
            return *v;
        }
        self.misses += 1;
        let v = evaluate_five(cards);
        if self.capacity == 0 {
            return v;
        }
        if self.map.len() >= self.capacity {
            self.map.clear();
        }
        self.map.insert(key, v);
        v
    }
}

impl Default for EvalCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

/// Hand evaluator with a five-card memo. Same results as [`evaluate`].
#[derive(Debug, Clone, Default)]
pub struct HandEvaluator {
    cache: EvalCache,
}

impl HandEvaluator {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: EvalCache::with_capacity(cache_capacity),
        }
    }

    pub fn evaluate(&mut self, cards: &[Card]) -> Result<HandValue, GameError> {
        let cache = &mut self.cache;
        best_of_subsets(cards, |five| cache.get_or_eval(five))
    }

    pub fn best_hand(&mut self, hole: &[Card], board: &[Card]) -> Result<HandValue, GameError> {
        let all: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
        self.evaluate(&all)
    }

    pub fn cache(&self) -> &EvalCache {
        &self.cache
    }
}
