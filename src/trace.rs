//! Feature-gated tracing macros.
//!
//! With the `tracing` feature, spans and events forward to the `tracing` crate.
//! Without it they expand to no-ops, so call sites stay free of `cfg`.

/// Info-level span around a builder, convolution, or dispatch entry point.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Info-level event with key/value measurements, emitted once per call.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
}

/// Debug-level event for per-call geometry such as zone extents.
#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
}

// Values are still evaluated so disabled builds see the same borrows.
#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use debug_event;
pub(crate) use trace_event;
pub(crate) use trace_span;

/// Span guard returned by `trace_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
