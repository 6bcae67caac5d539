//! Stage instrumentation for the decode and suppression passes.
//!
//! With the `tracing` feature every call opens an info span for its stage and
//! finishes with a summary event. Without it these functions are empty.

/// Holds the stage span entered until dropped.
#[must_use]
pub(crate) struct StageGuard {
    #[cfg(feature = "tracing")]
    _span: tracing::span::EnteredSpan,
}

/// Enters the `decode` span for a `(attributes, candidates)` tensor.
#[inline]
pub(crate) fn decode_span(attributes: usize, candidates: usize) -> StageGuard {
    #[cfg(feature = "tracing")]
    {
        StageGuard {
            _span: tracing::info_span!("decode", attributes, candidates).entered(),
        }
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = (attributes, candidates);
        StageGuard {}
    }
}

/// Enters the `suppress` span.
#[inline]
pub(crate) fn suppress_span(candidates: usize) -> StageGuard {
    #[cfg(feature = "tracing")]
    {
        StageGuard {
            _span: tracing::info_span!("suppress", candidates).entered(),
        }
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = candidates;
        StageGuard {}
    }
}

#[inline]
pub(crate) fn decode_done(kept: usize) {
    #[cfg(feature = "tracing")]
    tracing::info!(name: "decode_done", kept = kept);
    #[cfg(not(feature = "tracing"))]
    let _ = kept;
}

#[inline]
pub(crate) fn suppress_done(kept: usize, removed: usize) {
    #[cfg(feature = "tracing")]
    tracing::info!(name: "suppress_done", kept = kept, removed = removed);
    #[cfg(not(feature = "tracing"))]
    let _ = (kept, removed);
}
