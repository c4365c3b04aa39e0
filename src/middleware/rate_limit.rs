use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use tokio::sync::Semaphore;
use tracing::info;

static TOTAL_REQUESTS: AtomicU64 = AtomicU64::new(0);
static REJECTED_REQUESTS: AtomicU64 = AtomicU64::new(0);

// Bounds the number of extraction/optimization requests processed at once.
pub static REQUEST_SEMAPHORE: Lazy<Semaphore> = Lazy::new(|| {
    let max_requests = std::env::var("MAX_CONCURRENT_REQUESTS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);

    info!(
        max_concurrent_requests = max_requests,
        "Initializing request semaphore"
    );
    Semaphore::new(max_requests)
});

/// Record an attempt to enter a rate-limited handler. Returns a permit, or
/// `None` if the service is saturated.
pub fn try_acquire_permit() -> Option<tokio::sync::SemaphorePermit<'static>> {
    TOTAL_REQUESTS.fetch_add(1, Ordering::Relaxed);
    match REQUEST_SEMAPHORE.try_acquire() {
        Ok(permit) => Some(permit),
        Err(_) => {
            REJECTED_REQUESTS.fetch_add(1, Ordering::Relaxed);
            None
        }
    }
}

/// (total, rejected, available permits), for the health endpoint.
pub fn get_rate_limit_metrics() -> (u64, u64, usize) {
    let total = TOTAL_REQUESTS.load(Ordering::Relaxed);
    let rejected = REJECTED_REQUESTS.load(Ordering::Relaxed);
    let available = REQUEST_SEMAPHORE.available_permits();
    (total, rejected, available)
}
