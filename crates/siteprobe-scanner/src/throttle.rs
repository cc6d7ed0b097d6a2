//! Per-requester request gate.
//!
//! Not a token bucket: one allowed call restarts the window from that
//! instant, so a requester gets exactly one request per interval and unused
//! capacity never accumulates.

use crate::error::{Result, ScanError};
use siteprobe_core::{RequesterId, ThrottleConfig};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Last-allowed instant per requester, capacity-bounded.
#[derive(Debug)]
pub struct RequestThrottle {
    last_allowed: Mutex<HashMap<RequesterId, Instant>>,
    interval: Duration,
    capacity: usize,
}

impl RequestThrottle {
    #[must_use]
    pub fn new(interval: Duration, capacity: usize) -> Self {
        Self {
            last_allowed: Mutex::new(HashMap::new()),
            interval,
            capacity: capacity.max(1),
        }
    }

    #[must_use]
    pub fn from_config(config: &ThrottleConfig) -> Self {
        Self::new(config.interval(), config.max_tracked_requesters)
    }

    /// Allow the request if the requester has no record or its record is
    /// strictly older than the interval. Denials leave state untouched.
    pub fn allow(&self, requester: &RequesterId, now: Instant) -> bool {
        self.try_allow(requester, now).is_none()
    }

    /// Like [`allow`](Self::allow) but reports the remaining wait on denial.
    pub fn check(&self, requester: &RequesterId, now: Instant) -> Result<()> {
        match self.try_allow(requester, now) {
            None => Ok(()),
            Some(retry_after) => {
                tracing::debug!("Throttled {} for {:?}", requester, retry_after);
                Err(ScanError::Throttled {
                    requester: requester.to_string(),
                    retry_after,
                })
            }
        }
    }

    /// Number of requesters currently remembered.
    pub fn tracked(&self) -> usize {
        self.last_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// `None` when allowed (and recorded), otherwise the remaining wait.
    fn try_allow(&self, requester: &RequesterId, now: Instant) -> Option<Duration> {
        let mut map = self
            .last_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(&last) = map.get(requester) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed <= self.interval {
                return Some(self.interval - elapsed);
            }
        } else if map.len() >= self.capacity {
            self.make_room(&mut map, now);
        }

        map.insert(requester.clone(), now);
        None
    }

    /// Drop stale entries; if none were stale, drop the oldest.
    ///
    /// Stale entries would be allowed anyway, so sweeping them never changes
    /// a verdict. Evicting a live entry can grant its requester one early
    /// request.
    fn make_room(&self, map: &mut HashMap<RequesterId, Instant>, now: Instant) {
        let interval = self.interval;
        map.retain(|_, last| now.saturating_duration_since(*last) <= interval);

        if map.len() >= self.capacity {
            let oldest = map
                .iter()
                .min_by_key(|(_, last)| **last)
                .map(|(requester, _)| requester.clone());
            if let Some(oldest) = oldest {
                tracing::debug!("Evicting throttle entry for {}", oldest);
                map.remove(&oldest);
            }
        }
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::from_config(&ThrottleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn user(id: &str) -> RequesterId {
        RequesterId::new(id)
    }

    #[test]
    fn test_allow_window() {
        let throttle = RequestThrottle::new(Duration::from_secs(5), 16);
        let t0 = Instant::now();

        assert!(throttle.allow(&user("u"), t0));
        assert!(!throttle.allow(&user("u"), t0 + Duration::from_secs(1)));
        assert!(throttle.allow(&user("u"), t0 + Duration::from_secs(6)));
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let throttle = RequestThrottle::new(Duration::from_secs(5), 16);
        let t0 = Instant::now();

        assert!(throttle.allow(&user("u"), t0));
        assert!(!throttle.allow(&user("u"), t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_denial_does_not_extend_window() {
        let throttle = RequestThrottle::new(Duration::from_secs(5), 16);
        let t0 = Instant::now();

        assert!(throttle.allow(&user("u"), t0));
        assert!(!throttle.allow(&user("u"), t0 + Duration::from_secs(4)));
        // Measured from t0, not from the denied call at t0+4
        assert!(throttle.allow(&user("u"), t0 + Duration::from_millis(5_001)));
    }

    #[test]
    fn test_requesters_are_independent() {
        let throttle = RequestThrottle::new(Duration::from_secs(5), 16);
        let t0 = Instant::now();

        assert!(throttle.allow(&user("a"), t0));
        assert!(throttle.allow(&user("b"), t0));
        assert!(!throttle.allow(&user("a"), t0));
    }

    #[test]
    fn test_check_reports_remaining_wait() {
        let throttle = RequestThrottle::new(Duration::from_secs(5), 16);
        let t0 = Instant::now();

        assert!(throttle.check(&user("u"), t0).is_ok());
        match throttle.check(&user("u"), t0 + Duration::from_secs(2)) {
            Err(ScanError::Throttled { retry_after, .. }) => {
                assert_eq!(retry_after, Duration::from_secs(3));
            }
            other => panic!("expected throttled, got {other:?}"),
        }
    }

    #[test]
    fn test_capacity_sweeps_stale_entries_first() {
        let throttle = RequestThrottle::new(Duration::from_secs(5), 2);
        let t0 = Instant::now();

        assert!(throttle.allow(&user("a"), t0));
        assert!(throttle.allow(&user("b"), t0 + Duration::from_secs(4)));
        // "a" is stale at t0+7, "b" is not
        assert!(throttle.allow(&user("c"), t0 + Duration::from_secs(7)));
        assert_eq!(throttle.tracked(), 2);
        assert!(!throttle.allow(&user("b"), t0 + Duration::from_secs(7)));
    }

    #[test]
    fn test_capacity_evicts_oldest_when_all_live() {
        let throttle = RequestThrottle::new(Duration::from_secs(5), 2);
        let t0 = Instant::now();

        assert!(throttle.allow(&user("a"), t0));
        assert!(throttle.allow(&user("b"), t0 + Duration::from_secs(1)));
        assert!(throttle.allow(&user("c"), t0 + Duration::from_secs(2)));
        assert_eq!(throttle.tracked(), 2);
        // "a" was evicted, so it is let through early
        assert!(throttle.allow(&user("a"), t0 + Duration::from_secs(3)));
    }

    #[test]
    fn test_concurrent_check_and_set() {
        let throttle = Arc::new(RequestThrottle::new(Duration::from_secs(60), 16));
        let now = Instant::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let throttle = throttle.clone();
                std::thread::spawn(move || throttle.allow(&RequesterId::new("same"), now))
            })
            .collect();

        let allowed = handles
            .into_iter()
            .map(|h| h.join().expect("thread joins"))
            .filter(|&allowed| allowed)
            .count();
        assert_eq!(allowed, 1);
    }
}
