//! Dependency graph construction.
//!
//! Built on `petgraph::graphmap::DiGraphMap<usize, ()>` over channel ids.
//! Channels are 0-indexed internally (`[0, M)`).

use petgraph::graphmap::DiGraphMap;

use crate::channel::MassActionJump;
use crate::error::NrmError;
use crate::time::SimTime;

/// `D(i) ⊆ [0, M)` for every channel `i`, with `i ∈ D(i)` always.
pub struct DependencyGraph {
    graph: DiGraphMap<usize, ()>,
    num_channels: usize,
}

impl DependencyGraph {
    /// `D(i)` in ascending channel id order.
    pub fn successors(&self, channel: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self.graph.neighbors(channel).collect();
        out.sort_unstable();
        out
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Uses the caller-supplied graph verbatim, then augments it with
    /// self-loops. Idempotent: running this twice on an already-augmented
    /// graph changes nothing.
    pub fn from_user_supplied(num_channels: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = DiGraphMap::with_capacity(num_channels, edges.len());
        for i in 0..num_channels {
            graph.add_node(i);
        }
        for &(i, j) in edges {
            graph.add_edge(i, j, ());
        }
        let mut dg = Self { graph, num_channels };
        dg.add_self_loops();
        dg
    }

    /// Derives `D(i)` from mass-action stoichiometry: `j ∈ D(i)` iff
    /// channel `i`'s net stoichiometry touches a species that appears as a
    /// reactant in channel `j`. Fails with `MissingDependencyGraph` if any
    /// opaque channels are present (the core cannot introspect them).
    pub fn derive_from_stoichiometry<T: SimTime>(
        mass_action: &[MassActionJump<T>],
        num_opaque: usize,
    ) -> Result<Self, NrmError> {
        if num_opaque > 0 {
            return Err(NrmError::MissingDependencyGraph {
                opaque_count: num_opaque,
            });
        }
        let m = mass_action.len();
        let mut graph = DiGraphMap::with_capacity(m, m);
        for i in 0..m {
            graph.add_node(i);
        }
        for (i, fired) in mass_action.iter().enumerate() {
            let touched: Vec<usize> = fired.net_change().iter().map(|&(s, _)| s).collect();
            for (j, candidate) in mass_action.iter().enumerate() {
                let reacts_on_touched = candidate
                    .reactants()
                    .iter()
                    .any(|&(s, _)| touched.contains(&s));
                if reacts_on_touched {
                    graph.add_edge(i, j, ());
                }
            }
        }
        let mut dg = Self {
            graph,
            num_channels: m,
        };
        dg.add_self_loops();
        Ok(dg)
    }

    fn add_self_loops(&mut self) {
        for i in 0..self.num_channels {
            self.graph.add_edge(i, i, ());
        }
    }
}
