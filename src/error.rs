use thiserror::Error;

/// Errors the core can raise. All of them are fatal to the trajectory: the
/// aggregator never retries, because `u` may already be in a partially
/// updated state by the time an error surfaces.
#[derive(Error, Debug)]
pub enum NrmError {
    /// Raised at `build` when opaque (constant-rate) channels are present but
    /// no dependency graph was supplied; the core cannot introspect an
    /// opaque rate function to derive one itself.
    #[error("dependency graph required: {opaque_count} opaque channel(s) present but no dep_graph was supplied")]
    MissingDependencyGraph { opaque_count: usize },

    /// Raised at the evaluation site when a channel's rate comes back
    /// negative or NaN.
    #[error("channel {channel} evaluated to an invalid rate: {value}")]
    InvalidRateKind { channel: usize, value: f64 },

    /// Internal bug guard: an operation referenced a channel id outside
    /// `[0, M)`, or the heap's position index disagreed with its array.
    #[error("heap invariant violated: {detail}")]
    HeapInvariantViolation { detail: String },

    /// A failure raised inside a host-supplied rate or affect function,
    /// propagated unchanged.
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}
