//! Rate limiting utilities

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiter type alias
pub type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Per-address rate limiter type alias
pub type KeyedLimiter = DefaultKeyedRateLimiter<IpAddr>;

fn quota(requests_per_second: u32) -> Quota {
    Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN))
}

/// Create a rate limiter with the specified requests per second
pub fn create_limiter(requests_per_second: u32) -> Arc<Limiter> {
    Arc::new(RateLimiter::direct(quota(requests_per_second)))
}

/// Create a limiter keeping one bucket per client address
pub fn create_keyed_limiter(requests_per_second: u32) -> Arc<KeyedLimiter> {
    Arc::new(RateLimiter::keyed(quota(requests_per_second)))
}

/// Limiter for game listing requests, one quota per client address
///
/// Callers without a known address share a single bucket.
#[derive(Clone)]
pub struct ListingRateLimiter {
    per_client: Arc<KeyedLimiter>,
    anonymous: Arc<Limiter>,
}

impl ListingRateLimiter {
    pub fn new(requests_per_second: u32) -> Self {
        Self {
            per_client: create_keyed_limiter(requests_per_second),
            anonymous: create_limiter(requests_per_second),
        }
    }

    /// Check if a listing request is allowed (returns true if allowed)
    pub fn check(&self, client: Option<IpAddr>) -> bool {
        match client {
            Some(ip) => self.per_client.check_key(&ip).is_ok(),
            None => self.anonymous.check().is_ok(),
        }
    }

    /// Drop buckets of clients that have been idle long enough to be full again
    pub fn retain_recent(&self) {
        self.per_client.retain_recent();
        self.per_client.shrink_to_fit();
    }

    /// Number of client buckets currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.per_client.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_is_bounded() {
        let limiter = ListingRateLimiter::new(3);
        let allowed = (0..10).filter(|_| limiter.check(None)).count();
        assert_eq!(allowed, 3);
    }

    #[test]
    fn test_zero_rate_still_allows_one() {
        let limiter = ListingRateLimiter::new(0);
        assert!(limiter.check(None));
    }

    #[test]
    fn test_clients_do_not_share_a_quota() {
        let limiter = ListingRateLimiter::new(2);
        let busy: IpAddr = "198.51.100.7".parse().unwrap();
        let quiet: IpAddr = "203.0.113.8".parse().unwrap();

        let allowed = (0..10).filter(|_| limiter.check(Some(busy))).count();
        assert_eq!(allowed, 2);
        assert!(!limiter.check(Some(busy)));

        assert!(limiter.check(Some(quiet)));
        assert!(limiter.check(Some(quiet)));
        assert!(!limiter.check(Some(quiet)));
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_anonymous_bucket_is_separate() {
        let limiter = ListingRateLimiter::new(1);
        let client: IpAddr = "198.51.100.7".parse().unwrap();

        assert!(limiter.check(Some(client)));
        assert!(!limiter.check(Some(client)));
        assert!(limiter.check(None));
        assert!(!limiter.check(None));
    }
}
