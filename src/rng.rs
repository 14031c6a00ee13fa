//! The core's only randomness dependency: a source of `Exp(1)` draws.
//!
//! Prefers a deterministically-seeded `SmallRng` over `thread_rng()`:
//! identical seeds and identical inputs must produce an identical sequence
//! of firing events, which rules out any RNG source that isn't reproducible
//! from a seed.

use rand::rngs::{SmallRng, StdRng};
use rand_distr::{Distribution, Exp};

/// Supplies `randexp() -> Exp(1)` draws to the aggregator.
pub trait JumpRng {
    fn next_exp(&mut self) -> f64;
}

macro_rules! impl_jump_rng_via_rand_distr {
    ($($t:ty),+ $(,)?) => {
        $(
            impl JumpRng for $t {
                fn next_exp(&mut self) -> f64 {
                    let exp = Exp::new(1.0).expect("rate 1.0 is always valid");
                    exp.sample(self)
                }
            }
        )+
    };
}

impl_jump_rng_via_rand_distr!(SmallRng, StdRng);
