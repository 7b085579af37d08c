use std::time::{Duration, Instant};

/// Cooperative wall-clock budget for one batch invocation.
///
/// Checked between work units only; a unit in progress always completes.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeBudget {
    started: Instant,
    limit: Duration,
}

impl RuntimeBudget {
    pub fn start(limit_ms: u64) -> Self {
        Self {
            started: Instant::now(),
            limit: Duration::from_millis(limit_ms),
        }
    }

    /// A zero budget is exhausted immediately.
    pub fn is_exhausted(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}
