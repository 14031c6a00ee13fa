//! Numeric generic bound for simulated time, and the Gibson-Bruck
//! time-rescaling rule.

use num_traits::Float;

/// Bound satisfied by any real-valued time/rate representation: arithmetic,
/// total ordering via `PartialOrd`, and a `+∞` sentinel. `f64` is the crate's
/// default and the only type exercised by the test suite, but the aggregator,
/// heap, and rescaling functions below never assume it.
pub trait SimTime: Float + std::fmt::Debug {}
impl<T: Float + std::fmt::Debug> SimTime for T {}

/// Case A (the channel that just fired draws a fresh wait).
///
/// `exp_draw` must be distributed `Exp(1)`; the caller owns the RNG.
pub fn rescale_fired<T: SimTime>(t: T, new_rate: T, exp_draw: f64) -> T {
    if new_rate > T::zero() {
        let e = T::from(exp_draw).expect("Exp(1) draw representable in T");
        t + e / new_rate
    } else {
        T::infinity()
    }
}

/// Case B (`rx != prev_jump` and the channel's old rate was positive):
/// rescale the previously drawn waiting time rather than redrawing.
pub fn rescale_existing<T: SimTime>(t: T, old_rate: T, new_rate: T, tau_old: T) -> T {
    if new_rate > T::zero() {
        t + (old_rate / new_rate) * (tau_old - t)
    } else {
        T::infinity()
    }
}

/// Case C (`rx != prev_jump` and the channel's old rate was zero): there is
/// no waiting time to rescale, so draw a fresh one exactly as in Case A.
pub fn rescale_from_zero<T: SimTime>(t: T, new_rate: T, exp_draw: f64) -> T {
    rescale_fired(t, new_rate, exp_draw)
}
