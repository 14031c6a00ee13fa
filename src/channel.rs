//! Channel rate model.
//!
//! Species counts and rates share the aggregator's numeric type `T`
//! (`SimTime`); the state vector `u` is therefore `&[T]` / `&mut [T]` rather
//! than a fully opaque foreign type. Channels dispatch over a small sum type
//! by variant tag rather than by trait object everywhere, while still
//! treating `u` as opaque to the core: nothing here interprets what a given
//! species index *means*.

use crate::error::NrmError;
use crate::time::SimTime;

/// Read-only view of the simulation clock and end time that affect
/// functions may consult. The core never inspects this beyond reading
/// `end_time` once at `initialize`.
pub trait Integrator<T: SimTime> {
    fn end_time(&self) -> T;
}

/// A mass-action channel: reactant multiplicities plus a rate constant.
///
/// `reactants` holds `(species, nu)` pairs used for the rate's
/// falling-factorial product; `net_change` holds the signed stoichiometric
/// delta per species, used both by the default affect and by the
/// dependency-graph builder to tell which species a firing
/// touches.
#[derive(Debug, Clone)]
pub struct MassActionJump<T: SimTime> {
    reactants: Vec<(usize, u32)>,
    net_change: Vec<(usize, i64)>,
    rate_constant: T,
}

impl<T: SimTime> MassActionJump<T> {
    pub fn new(reactants: Vec<(usize, u32)>, net_change: Vec<(usize, i64)>, rate_constant: T) -> Self {
        Self {
            reactants,
            net_change,
            rate_constant,
        }
    }

    pub fn reactants(&self) -> &[(usize, u32)] {
        &self.reactants
    }

    pub fn net_change(&self) -> &[(usize, i64)] {
        &self.net_change
    }

    /// Falling-factorial convention (`k · ∏ u[s]·(u[s]-1)·…·(u[s]-ν+1) / ν!`),
    /// rather than the plain combinatoric binomial: it matches Gibson and
    /// Bruck's own convention and degrades exactly to zero once a reactant
    /// is exhausted instead of needing a separate guard.
    pub fn rate(&self, u: &[T]) -> T {
        let mut rate = self.rate_constant;
        for &(species, nu) in &self.reactants {
            let count = u[species];
            rate = rate * falling_factorial_over_nu_factorial(count, nu);
        }
        rate
    }

    /// Default affect: applies `net_change` to `u`. Channels whose firing
    /// does more than adjust counts (e.g. host bookkeeping) should wrap this
    /// in a custom `Affect` impl instead of relying on the default.
    pub fn affect(&self, u: &mut [T]) {
        for &(species, delta) in &self.net_change {
            u[species] = u[species] + T::from(delta).expect("stoichiometric delta representable in T");
        }
    }
}

/// `k · u·(u-1)·…·(u-ν+1) / ν!`, computed term by term to avoid overflow on
/// large `ν`. Zero once `u < ν`, matching the combinatoric convention's
/// "exactly zero, not just small" guarantee once reactants are exhausted.
fn falling_factorial_over_nu_factorial<T: SimTime>(u: T, nu: u32) -> T {
    let mut acc = T::one();
    let mut term = u;
    for k in 1..=nu {
        if term <= T::zero() {
            return T::zero();
        }
        acc = acc * term / T::from(k).expect("small integer representable in T");
        term = term - T::one();
    }
    acc
}

/// An opaque constant-rate channel: `rate_i(u, p, t)` plus `affect_i`. Named
/// "constant-rate" because the rate is not a stochastic functional of
/// internal time between events (it may still read `u`, `p`,
/// and `t` at event boundaries).
pub trait OpaqueJump<T: SimTime, P, I: Integrator<T>> {
    fn rate(&self, u: &[T], p: &P, t: T) -> Result<T, NrmError>;
    fn affect(&self, u: &mut [T], p: &P, integrator: &I) -> Result<(), NrmError>;
}

/// A channel is either mass-action or opaque; a single indexed iteration
/// over `[Channel; M]` visits both kinds, dispatching on the variant tag.
pub enum Channel<T: SimTime, P, I: Integrator<T>> {
    MassAction(MassActionJump<T>),
    Opaque(Box<dyn OpaqueJump<T, P, I>>),
}

impl<T: SimTime, P, I: Integrator<T>> Channel<T, P, I> {
    /// Evaluates the channel's current intensity, rejecting a negative or
    /// NaN result with `InvalidRateKind` (the validation every evaluation
    /// site must perform regardless of channel kind).
    pub fn evaluate(&self, id: usize, u: &[T], p: &P, t: T) -> Result<T, NrmError> {
        let rate = match self {
            Channel::MassAction(ma) => ma.rate(u),
            Channel::Opaque(op) => op.rate(u, p, t)?,
        };
        if rate.is_nan() || rate < T::zero() {
            return Err(NrmError::InvalidRateKind {
                channel: id,
                value: rate.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(rate)
    }

    pub fn apply_affect(&self, u: &mut [T], p: &P, integrator: &I) -> Result<(), NrmError> {
        match self {
            Channel::MassAction(ma) => {
                ma.affect(u);
                Ok(())
            }
            Channel::Opaque(op) => op.affect(u, p, integrator),
        }
    }

    pub fn is_mass_action(&self) -> bool {
        matches!(self, Channel::MassAction(_))
    }
}
