//! Advisory limiter for parallel branch-and-bound workers.
//!
//! A single process-wide counter is compared against a configured cap.
//! Acquisition can fail; callers then run the work inline on the current
//! thread, so the search always makes progress regardless of the cap.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Cap on in-flight workers. Zero until [`configure`] runs.
static MAX_WORKERS: AtomicUsize = AtomicUsize::new(0);

/// Number of currently reserved worker slots.
static CURRENT_WORKERS: AtomicUsize = AtomicUsize::new(0);

/// Set the worker cap. A request of zero resolves to half the reported
/// hardware parallelism, with a floor of one.
pub fn configure(threads: usize) {
    let cap = if threads == 0 {
        default_workers()
    } else {
        threads
    };
    MAX_WORKERS.store(cap, Ordering::Relaxed);
}

/// Half the reported parallelism: a rough stand-in for physical cores on
/// machines with two hardware threads per core.
pub fn default_workers() -> usize {
    let cpus = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    (cpus / 2).max(1)
}

/// Reserve a worker slot. Returns `false` when the cap is reached or the
/// limiter is unconfigured.
pub fn try_acquire() -> bool {
    let max = MAX_WORKERS.load(Ordering::Relaxed);
    if max == 0 {
        return false;
    }
    loop {
        let current = CURRENT_WORKERS.load(Ordering::Relaxed);
        if current >= max {
            return false;
        }
        if CURRENT_WORKERS
            .compare_exchange(current, current + 1, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return true;
        }
    }
}

/// Release a slot taken with [`try_acquire`].
pub fn release() {
    CURRENT_WORKERS.fetch_sub(1, Ordering::Relaxed);
}
