//! Request throttle for outgoing calls

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorRateLimiter,
};
use std::num::NonZeroU32;
use tracing::trace;

/// Allows bursts up to `requests_per_second`, refilling continuously.
pub struct RateLimiter {
    limiter: GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    rate: NonZeroU32,
}

impl RateLimiter {
    /// A rate of zero is treated as one request per second.
    pub fn new(requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: GovernorRateLimiter::direct(Quota::per_second(rate)),
            rate,
        }
    }

    /// Wait until a request may be sent.
    pub async fn acquire(&self) {
        if self.limiter.check().is_ok() {
            return;
        }
        trace!(rate = self.rate.get(), "request throttled");
        self.limiter.until_ready().await;
    }

    #[must_use]
    pub fn rate(&self) -> u32 {
        self.rate.get()
    }
}
