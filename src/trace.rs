//! Feature-gated tracing macros.
//!
//! With the `tracing` feature every public image operation opens an info span
//! carrying its dimensions and parameters. Applied thresholds are info events
//! tagged with the binarization method; progress percentages are debug
//! events. Without the feature the macros expand to nothing.

/// Opens an info-level span for one image operation.
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

/// Emits an info-level event with `key = value` fields.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

/// Emits the applied threshold of a global binarizer, tagged by method.
#[cfg(feature = "tracing")]
macro_rules! trace_threshold {
    ($method:literal, $threshold:expr $(, $($key:ident = $value:expr),+)?) => {
        tracing::info!(
            name: "threshold",
            method = $method,
            threshold = $threshold
            $(, $($key = $value),+)?
        )
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_threshold {
    ($method:literal, $threshold:expr $(, $($key:ident = $value:expr),+)?) => {
        let _ = ($threshold, $($($value,)+)?);
    };
}

/// Emits a debug-level progress percentage.
#[cfg(feature = "tracing")]
macro_rules! trace_progress {
    ($percent:expr) => {
        tracing::debug!(name: "progress", percent = $percent)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_progress {
    ($percent:expr) => {
        let _ = $percent;
    };
}

pub(crate) use trace_event;
pub(crate) use trace_progress;
pub(crate) use trace_span;
pub(crate) use trace_threshold;

/// Stand-in span guard so `trace_span!(..).entered()` compiles without the
/// `tracing` feature.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
