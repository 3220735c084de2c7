// Leading-edge rate limiting for pointer-driven updates
use std::time::{Duration, Instant};

/// Lets the first event of a burst through and drops every event arriving
/// less than `min_interval` after the last one let through.
///
/// Dropped events are not replayed later.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_forwarded: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_forwarded: None,
        }
    }

    pub fn admit_at(&mut self, now: Instant) -> bool {
        let ready = match self.last_forwarded {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
        };
        if ready {
            self.last_forwarded = Some(now);
        }
        ready
    }
}

/// A function wrapped in a [`Throttle`].
pub struct Throttled<F> {
    throttle: Throttle,
    func: F,
}

/// Wraps `func` so calls closer than `min_interval` to the last forwarded one
/// are dropped.
pub fn throttle<F>(func: F, min_interval: Duration) -> Throttled<F> {
    Throttled {
        throttle: Throttle::new(min_interval),
        func,
    }
}

impl<F> Throttled<F> {
    /// Calls the wrapped function as of `now`. Returns `None` when the call
    /// was dropped.
    pub fn call_at<A, R>(&mut self, now: Instant, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.throttle.admit_at(now) {
            Some((self.func)(arg))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_forwards_only_first_call() {
        let start = Instant::now();
        let mut forwarded = Vec::new();
        let mut wrapped = throttle(|t: u64| forwarded.push(t), Duration::from_millis(50));

        for t in (0..50).step_by(5) {
            wrapped.call_at(start + Duration::from_millis(t), t);
        }
        wrapped.call_at(start + Duration::from_millis(50), 50);
        wrapped.call_at(start + Duration::from_millis(60), 60);
        wrapped.call_at(start + Duration::from_millis(100), 100);

        drop(wrapped);
        assert_eq!(forwarded, vec![0, 50, 100]);
    }

    #[test]
    fn test_window_restarts_from_last_forwarded_call() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(50));

        assert!(throttle.admit_at(start));
        assert!(!throttle.admit_at(start + Duration::from_millis(49)));
        assert!(throttle.admit_at(start + Duration::from_millis(70)));
        // 70 + 50 = 120
        assert!(!throttle.admit_at(start + Duration::from_millis(110)));
        assert!(throttle.admit_at(start + Duration::from_millis(120)));
    }

    #[test]
    fn test_dropped_call_returns_none() {
        let start = Instant::now();
        let mut wrapped = throttle(|x: i32| x * 2, Duration::from_millis(50));
        assert_eq!(wrapped.call_at(start, 2), Some(4));
        assert_eq!(wrapped.call_at(start + Duration::from_millis(10), 3), None);
    }
}
