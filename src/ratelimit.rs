use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;

// Navigations per second across a whole run.
pub const DEFAULT_NAV_PER_SEC: NonZeroU32 = nonzero!(2u32);

type SpecificGovernorRateLimiter =
    GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock, NoOpMiddleware<QuantaInstant>>;

/// Paces navigations to the directory site.
pub struct RateLimiter {
    nav_per_sec: SpecificGovernorRateLimiter,
}

impl RateLimiter {
    pub fn new(nav_per_sec: NonZeroU32) -> Self {
        RateLimiter {
            nav_per_sec: GovernorRateLimiter::direct(Quota::per_second(nav_per_sec)),
        }
    }

    pub async fn wait_until_ready(&self) {
        self.nav_per_sec.until_ready().await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_NAV_PER_SEC)
    }
}
