//! Core of an exact stochastic simulation algorithm for continuous-time
//! Markov jump processes: the Next Reaction Method of Gibson and Bruck
//! (2000).
//!
//! This crate owns the aggregator's state machine, the indexed min-heap of
//! per-channel next-firing times, and the dependency graph that lets it
//! recompute only the rates a firing actually affects. Integration with an
//! ODE/SDE time-stepper, problem construction, and trajectory storage are
//! the host's responsibility -- see the `demos/simulate` binary (behind the
//! `cli` feature) for a minimal host loop.
//!
//! This crate doesn't fix a concrete numeric type for time or species
//! counts, since [`time::SimTime`] is generic; callers typically instantiate
//! it at `f64`.

pub mod aggregator;
pub mod channel;
pub mod error;
pub mod graph;
pub mod heap;
pub mod rng;
pub mod time;

pub use aggregator::{Aggregator, AggregatorState};
pub use channel::{Channel, Integrator, MassActionJump, OpaqueJump};
pub use error::NrmError;
pub use graph::DependencyGraph;
pub use heap::IndexedMinHeap;
pub use rng::JumpRng;
pub use time::SimTime;
