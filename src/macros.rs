// Conditional tracing support. With the `tracing` feature disabled these
// expand to nothing and the compiler eliminates them.

/// Enter a tracing span for an estimator run.
macro_rules! trace_run {
    ($name:expr, $($field:tt)*) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("rank", estimator = $name, $($field)*).entered();
    };
}

macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

macro_rules! log_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}
