//! Random source for mine placement and preset picking.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Draws mine positions.
///
/// Built from OS entropy for real games (browser crypto on wasm32), or from
/// a `u64` seed so a board's layout can be replayed in tests and benches.
#[derive(Debug, Clone)]
pub struct MineRng {
    inner: SmallRng,
}

impl MineRng {
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    #[inline]
    pub fn gen_range(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }

    /// Take `count` distinct entries out of `pool`, one uniform pick at a
    /// time from whatever is left.
    ///
    /// # Panics
    ///
    /// If `count` exceeds the pool size.
    pub fn choose_mines(&mut self, mut pool: Vec<usize>, count: usize) -> Vec<usize> {
        assert!(
            count <= pool.len(),
            "cannot place {} mines among {} candidate tiles",
            count,
            pool.len()
        );
        (0..count)
            .map(|_| {
                let pick = self.gen_range(pool.len());
                pool.swap_remove(pick)
            })
            .collect()
    }
}

impl Default for MineRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_layout() {
        let pool: Vec<usize> = (0..81).collect();
        let a = MineRng::from_seed(42).choose_mines(pool.clone(), 10);
        let b = MineRng::from_seed(42).choose_mines(pool, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_choose_mines_distinct_and_from_pool() {
        let pool: Vec<usize> = (0..100).filter(|i| i % 3 != 0).collect();
        let allowed: HashSet<usize> = pool.iter().copied().collect();
        let mut rng = MineRng::from_seed(123);
        for _ in 0..50 {
            let mines = rng.choose_mines(pool.clone(), 20);
            let unique: HashSet<usize> = mines.iter().copied().collect();
            assert_eq!(unique.len(), 20);
            assert!(unique.is_subset(&allowed));
        }
    }

    #[test]
    fn test_choose_whole_pool() {
        let mut rng = MineRng::from_seed(7);
        let mut mines = rng.choose_mines(vec![4, 8, 15], 3);
        mines.sort_unstable();
        assert_eq!(mines, vec![4, 8, 15]);
    }

    #[test]
    fn test_every_candidate_can_be_drawn() {
        let mut rng = MineRng::from_seed(1);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.extend(rng.choose_mines((0..10).collect(), 1));
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    #[should_panic(expected = "cannot place")]
    fn test_too_many_for_pool_panics() {
        MineRng::from_seed(0).choose_mines(vec![1, 2], 3);
    }
}
