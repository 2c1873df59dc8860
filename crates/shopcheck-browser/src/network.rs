//! In-flight request bookkeeping behind [`LoadState::NetworkIdle`].
//!
//! The page's event listener reports every `Network.requestWillBeSent`,
//! `loadingFinished` and `loadingFailed`. The network is idle once nothing
//! has been in flight for a while, however many requests the page made.
//!
//! [`LoadState::NetworkIdle`]: crate::page::LoadState::NetworkIdle

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Activity {
    in_flight: HashSet<String>,
    last_change: Instant,
}

/// Requests a tab has started but not yet finished. Clones share state.
#[derive(Debug, Clone)]
pub(crate) struct NetworkTracker {
    activity: Arc<Mutex<Activity>>,
}

impl Default for NetworkTracker {
    fn default() -> Self {
        Self {
            activity: Arc::new(Mutex::new(Activity {
                in_flight: HashSet::new(),
                last_change: Instant::now(),
            })),
        }
    }
}

impl NetworkTracker {
    fn with_activity<R>(&self, f: impl FnOnce(&mut Activity) -> R) -> R {
        let mut activity = self.activity.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut activity)
    }

    /// A request was sent. Redirect hops reuse the id and only refresh the
    /// activity clock.
    pub(crate) fn started(&self, request_id: &str) {
        self.with_activity(|a| {
            a.in_flight.insert(request_id.to_string());
            a.last_change = Instant::now();
        });
    }

    /// A request finished or failed.
    pub(crate) fn settled(&self, request_id: &str) {
        self.with_activity(|a| {
            if a.in_flight.remove(request_id) {
                a.last_change = Instant::now();
            }
        });
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.with_activity(|a| a.in_flight.len())
    }

    /// How long nothing has been in flight, or `None` while requests are
    /// still pending.
    pub(crate) fn quiet_for(&self) -> Option<Duration> {
        self.with_activity(|a| a.in_flight.is_empty().then(|| a.last_change.elapsed()))
    }
}
