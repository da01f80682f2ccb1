use crate::comparator::resolve;
use crate::raw::{time_from_canonical, time_to_canonical};
use crate::{CanonicalSize, LimitStore, TimeLimitMax};
use tracing::{debug, info, warn};

/// Raises the execution time limit (seconds, `0` = unlimited)
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeLimitManager {
    max: TimeLimitMax,
}

impl TimeLimitManager {
    pub fn new(max: TimeLimitMax) -> Self {
        Self { max }
    }

    /// Set the time ceiling in seconds (`None` or `0` removes it)
    pub fn set_time_limit_max(&mut self, seconds: Option<u64>) {
        self.max.set(seconds);
        info!(max = %self.max.ceiling(), "Time limit ceiling configured");
    }

    pub fn get_time_limit_max(&self) -> Option<u64> {
        self.max.get()
    }

    /// Current live time limit
    pub fn time_limit<S: LimitStore + ?Sized>(&self, store: &S) -> CanonicalSize {
        time_to_canonical(store.get_time_limit())
    }

    /// Raise the live time limit towards `request` seconds
    ///
    /// `None` or `Some(0)` asks for unlimited. Returns `false` if the store
    /// refused the write; nothing is retried.
    pub fn increase_time_limit_to<S: LimitStore + ?Sized>(
        &self,
        store: &mut S,
        request: Option<u64>,
    ) -> bool {
        let requested = request.map(time_to_canonical);
        let current = self.time_limit(&*store);
        let resolved = resolve(current, requested, self.max.ceiling());

        debug!(
            current = %current,
            resolved = %resolved,
            "Resolved time limit"
        );

        let seconds = time_from_canonical(resolved);
        let accepted = store.set_time_limit(seconds);
        if !accepted {
            warn!(seconds, "Host refused to change the time limit");
        }
        accepted
    }
}
