//! The Next Reaction Method aggregator: owns the rate model,
//! dependency graph, indexed heap, and RNG, and exposes
//! `build` / `initialize` / `peek_next` / `execute_jump`.

use crate::channel::{Channel, Integrator, MassActionJump};
use crate::error::NrmError;
use crate::graph::DependencyGraph;
use crate::heap::IndexedMinHeap;
use crate::rng::JumpRng;
use crate::time::{rescale_existing, rescale_fired, rescale_from_zero, SimTime};

/// `Fresh -> Initialized -> (...)* -> Done`. The intra-cycle
/// `PeekedNext -> Executing -> Updated` states are not separately
/// observable: `execute_jump` runs that whole sub-cycle before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    Fresh,
    Initialized,
    Done,
}

pub struct Aggregator<T: SimTime, P, I: Integrator<T>, R: JumpRng> {
    channels: Vec<Channel<T, P, I>>,
    dep_gr: DependencyGraph,
    cur_rates: Vec<T>,
    pq: IndexedMinHeap<T>,
    rng: R,
    end_time: T,
    next_jump_time: T,
    next_jump: usize,
    prev_jump: Option<usize>,
    state: AggregatorState,
}

impl<T: SimTime, P, I: Integrator<T>, R: JumpRng> Aggregator<T, P, I, R> {
    /// `build(end_time, ma_spec, opaque_rates, opaque_affects, ..., rng,
    /// num_species, dep_graph?)`, folded here into a single
    /// `channels` vector (mass-action and opaque variants of the one
    /// `Channel` sum type) plus an optional pre-built dependency graph.
    ///
    /// If `dep_graph` is `None` and every channel is mass-action, `D(i)` is
    /// derived from stoichiometry; if any channel is opaque,
    /// this fails with `MissingDependencyGraph`.
    pub fn build(
        channels: Vec<Channel<T, P, I>>,
        dep_graph: Option<DependencyGraph>,
        rng: R,
        end_time: T,
    ) -> Result<Self, NrmError> {
        let num_channels = channels.len();
        let dep_gr = match dep_graph {
            Some(g) => g,
            None => {
                let num_opaque = channels.iter().filter(|c| !c.is_mass_action()).count();
                let mass_action: Vec<MassActionJump<T>> = channels
                    .iter()
                    .filter_map(|c| match c {
                        Channel::MassAction(ma) => Some(ma.clone()),
                        Channel::Opaque(_) => None,
                    })
                    .collect();
                DependencyGraph::derive_from_stoichiometry(&mass_action, num_opaque)?
            }
        };
        log::info!("built aggregator with {num_channels} channels");
        Ok(Self {
            channels,
            dep_gr,
            cur_rates: vec![T::zero(); num_channels],
            pq: IndexedMinHeap::build(vec![T::infinity(); num_channels]),
            rng,
            end_time,
            next_jump_time: T::infinity(),
            next_jump: 0,
            prev_jump: None,
            state: AggregatorState::Fresh,
        })
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    pub fn cur_rate(&self, channel: usize) -> T {
        self.cur_rates[channel]
    }

    /// The time currently scheduled for `channel` in the priority queue,
    /// regardless of whether it is the current minimum.
    pub fn scheduled_time(&self, channel: usize) -> Result<T, NrmError> {
        self.pq.read(channel)
    }

    /// `initialize(u, p, t, end_time)`: evaluates every
    /// channel's rate, draws an independent `Exp(1)` per channel, and sets
    /// `pq[i] = t + E_i/cur_rates[i]` (or `+∞` if the rate is zero).
    pub fn initialize(&mut self, u: &[T], p: &P, t: T) -> Result<(), NrmError> {
        if self.state != AggregatorState::Fresh {
            return Err(NrmError::HeapInvariantViolation {
                detail: "initialize called outside the Fresh state".into(),
            });
        }
        let mut times = Vec::with_capacity(self.channels.len());
        for (id, channel) in self.channels.iter().enumerate() {
            let rate = channel.evaluate(id, u, p, t)?;
            self.cur_rates[id] = rate;
            let scheduled = if rate > T::zero() {
                rescale_fired(t, rate, self.rng.next_exp())
            } else {
                T::infinity()
            };
            times.push(scheduled);
        }
        self.pq = IndexedMinHeap::build(times);
        self.sync_top();
        self.state = AggregatorState::Initialized;
        log::info!("initialized aggregator, first jump at {:?}", self.next_jump_time);
        Ok(())
    }

    /// `peek_next()`: pure, returns the current heap minimum.
    pub fn peek_next(&self) -> (T, usize) {
        (self.next_jump_time, self.next_jump)
    }

    /// `execute_jump(integrator, u, p, t)`: applies the affect
    /// of the next-scheduled channel, then recomputes every dependent
    /// channel's rate and reschedules it. Advances `prev_jump`.
    ///
    /// A no-op returning `Done` if the aggregator already reached the
    /// terminal state.
    pub fn execute_jump(&mut self, integrator: &I, u: &mut [T], p: &P, t: T) -> Result<AggregatorState, NrmError> {
        if self.state == AggregatorState::Done {
            return Ok(self.state);
        }
        if self.state != AggregatorState::Initialized {
            return Err(NrmError::HeapInvariantViolation {
                detail: "execute_jump called before initialize".into(),
            });
        }
        let (_, fired) = self.pq.peek_min();
        self.channels[fired].apply_affect(u, p, integrator)?;
        self.prev_jump = Some(fired);
        self.update_dependent_rates(fired, u, p, t)?;
        self.sync_top();
        if self.next_jump_time.is_infinite() || self.next_jump_time >= self.end_time {
            self.state = AggregatorState::Done;
            log::info!("aggregator reached Done at t={t:?}");
        }
        Ok(self.state)
    }

    /// `update_dependent_rates(u, p, t)`: for each `rx in
    /// D(prev_jump)`, re-evaluate its rate and reschedule per the
    /// time-rescaling rule, iterating `D(prev_jump)` in
    /// ascending channel id for deterministic RNG consumption order.
    fn update_dependent_rates(&mut self, prev_jump: usize, u: &[T], p: &P, t: T) -> Result<(), NrmError> {
        for rx in self.dep_gr.successors(prev_jump) {
            let old_rate = self.cur_rates[rx];
            let new_rate = self.channels[rx].evaluate(rx, u, p, t)?;
            self.cur_rates[rx] = new_rate;
            let tau_old = self.pq.read(rx)?;
            let new_time = if rx == prev_jump {
                rescale_fired(t, new_rate, self.rng.next_exp())
            } else if old_rate > T::zero() {
                rescale_existing(t, old_rate, new_rate, tau_old)
            } else {
                rescale_from_zero(t, new_rate, self.rng.next_exp())
            };
            log::debug!("rescheduled channel {rx}: {old_rate:?} -> {new_rate:?}, t={new_time:?}");
            self.pq.update(rx, new_time)?;
        }
        Ok(())
    }

    fn sync_top(&mut self) {
        let (time, id) = self.pq.peek_min();
        self.next_jump_time = time;
        self.next_jump = id;
    }
}
