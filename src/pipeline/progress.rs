//! Progress reporting and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives progress updates during summarization.
///
/// `fraction` is the overall completion in `[0, 1]`; `sub_progress`
/// carries fine-grained completion within the current stage (chunked
/// runs report per-window progress through it).
pub trait ProgressSink: Send + Sync {
    fn report(&self, fraction: f64, message: &str, sub_progress: Option<f64>);
}

/// Adapter that lets a closure act as a [`ProgressSink`].
pub struct ProgressFn<F>(pub F);

impl<F> ProgressSink for ProgressFn<F>
where
    F: Fn(f64, &str, Option<f64>) + Send + Sync,
{
    fn report(&self, fraction: f64, message: &str, sub_progress: Option<f64>) {
        (self.0)(fraction, message, sub_progress)
    }
}

/// Sink that discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _fraction: f64, _message: &str, _sub_progress: Option<f64>) {}
}

/// Shared flag for cancelling a run in flight.
///
/// Clones observe the same flag; the pipeline polls it at stage
/// boundaries, between ranking iterations, and between chunk windows.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_closure_as_progress_sink() {
        use std::sync::Mutex;
        let seen: Mutex<Vec<f64>> = Mutex::new(vec![]);
        let sink = ProgressFn(|fraction: f64, _message: &str, _sub: Option<f64>| {
            seen.lock().unwrap().push(fraction);
        });
        sink.report(0.5, "halfway", None);
        assert_eq!(*seen.lock().unwrap(), vec![0.5]);
    }
}
