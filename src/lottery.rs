/// Weighted draw of upgrade options, without replacement.
///
/// All randomness in the crate goes through [`RandomSource`], so callers pick
/// determinism: a seeded `StdRng`, `thread_rng()`, or a scripted source in
/// tests.

use log::debug;
use rand::{Rng, RngCore};

use crate::entities::UpgradeOption;

pub trait RandomSource {
    /// Uniform integer in `[0, bound)`.  `bound` must be positive.
    fn below(&mut self, bound: u32) -> u32;

    /// Uniform float in `[low, high]`.
    fn within(&mut self, low: f32, high: f32) -> f32;
}

impl<R: RngCore> RandomSource for R {
    fn below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }

    fn within(&mut self, low: f32, high: f32) -> f32 {
        self.gen_range(low..=high)
    }
}

/// Draw up to `count` distinct options from `pool`, each draw proportional to
/// weight among the options still left.
///
/// Stops early when the pool runs dry or only zero-weight entries remain, so
/// a zero-weight entry is never returned.
pub fn select_upgrades(
    pool: &[UpgradeOption],
    count: usize,
    rng: &mut impl RandomSource,
) -> Vec<UpgradeOption> {
    let mut candidates: Vec<UpgradeOption> = pool.to_vec();
    let mut results = Vec::with_capacity(count.min(pool.len()));

    for _ in 0..count {
        let total_weight: u32 = candidates.iter().map(|o| o.weight).sum();
        if candidates.is_empty() || total_weight == 0 {
            break;
        }

        let roll = rng.below(total_weight);
        let mut cumulative = 0;
        let picked = candidates.iter().position(|o| {
            cumulative += o.weight;
            roll < cumulative
        });

        match picked {
            Some(index) => results.push(candidates.remove(index)),
            None => break,
        }
    }

    debug!("Drew upgrades {:?}", results);
    results
}
