use crate::cards::{Card, CARD_VALUES, FACE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A weighted pool over the card values `0..=9`.
///
/// Each value appears `weight` times in the pool and a draw picks uniformly
/// from the pool, so a weight of 0 excludes a value entirely. The pool is
/// infinite: drawing never consumes anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPool {
    weights: [u32; CARD_VALUES],
}

impl CardPool {
    /// Every value once.
    ///
    /// ```
    /// use boom_rs::deck::CardPool;
    ///
    /// let pool = CardPool::uniform();
    /// assert_eq!(pool.len(), 10);
    /// ```
    pub const fn uniform() -> Self {
        Self { weights: [1; CARD_VALUES] }
    }

    /// Every value except the face card. Used for anything that becomes an
    /// accumulator, since a face accumulator stores no life.
    pub const fn without_face() -> Self {
        let mut weights = [1; CARD_VALUES];
        weights[FACE as usize] = 0;
        Self { weights }
    }

    /// Explicit weights; unspecified values keep weight 1.
    pub fn with_weights<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (Card, u32)>,
    {
        let mut pool = Self::uniform();
        for (card, weight) in overrides {
            if let Some(w) = pool.weights.get_mut(card as usize) {
                *w = weight;
            }
        }
        pool
    }

    pub fn weight(&self, card: Card) -> u32 {
        self.weights.get(card as usize).copied().unwrap_or(0)
    }

    /// Size of the weighted pool.
    pub fn len(&self) -> usize {
        self.weights.iter().map(|&w| w as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw one card using the provided RNG. `None` when every weight is 0.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Card> {
        let total = self.len();
        if total == 0 {
            return None;
        }
        let mut pick = rng.random_range(0..total);
        for (value, &w) in self.weights.iter().enumerate() {
            let w = w as usize;
            if pick < w {
                return Some(value as Card);
            }
            pick -= w;
        }
        None
    }

    /// Draw `n` cards.
    pub fn draw_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw(rng)).collect()
    }

    /// Draw using a seeded RNG for reproducibility.
    pub fn draw_seeded(&self, seed: u64) -> Option<Card> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.draw(&mut rng)
    }
}

impl Default for CardPool {
    fn default() -> Self {
        Self::uniform()
    }
}

const UNIFORM: CardPool = CardPool::uniform();
const LIFE: CardPool = CardPool::without_face();

/// A card for a hand. Both built-in pools are non-empty.
pub(crate) fn random_card<R: Rng + ?Sized>(rng: &mut R) -> Card {
    UNIFORM.draw(rng).unwrap_or(FACE)
}

/// A card that becomes an accumulator.
pub(crate) fn random_life_card<R: Rng + ?Sized>(rng: &mut R) -> Card {
    LIFE.draw(rng).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_face_never_draws_zero() {
        let pool = CardPool::without_face();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let c = pool.draw(&mut rng).unwrap();
            assert!((1..=9).contains(&c));
        }
    }

    #[test]
    fn zero_weights_exclude_values() {
        let pool = CardPool::with_weights((0..=9).filter(|&c| c != 4).map(|c| (c, 0)));
        assert_eq!(pool.len(), 1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(pool.draw(&mut rng), Some(4));
        }
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let pool = CardPool::with_weights((0..=9).map(|c| (c, 0)));
        assert!(pool.is_empty());
        assert_eq!(pool.draw_seeded(1), None);
    }

    #[test]
    fn seeded_draw_is_reproducible() {
        let pool = CardPool::uniform();
        assert_eq!(pool.draw_seeded(42), pool.draw_seeded(42));
    }

    #[test]
    fn heavier_weight_dominates() {
        let pool = CardPool::with_weights([(5, 90)]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let fives = pool.draw_n(&mut rng, 1000).into_iter().filter(|&c| c == 5).count();
        assert!(fives > 800, "got {fives} fives");
    }

    #[test]
    fn unknown_values_are_ignored_in_overrides() {
        let pool = CardPool::with_weights([(12, 5)]);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.weight(12), 0);
    }
}
