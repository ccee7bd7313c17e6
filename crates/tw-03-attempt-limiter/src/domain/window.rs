//! Sliding window of admitted attempts for one identity.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Admitted attempt timestamps, oldest first.
#[derive(Debug, Clone, Default)]
pub struct AttemptWindow {
    attempts: VecDeque<Instant>,
}

impl AttemptWindow {
    /// Drop attempts that are `window` or more in the past.
    pub fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.attempts.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.attempts.pop_front();
            } else {
                break;
            }
        }
    }

    /// Prune, then admit and record `now` if fewer than `max` remain.
    /// A denied attempt is not recorded.
    pub fn try_record(&mut self, now: Instant, window: Duration, max: u32) -> bool {
        self.prune(now, window);
        if self.attempts.len() < max as usize {
            self.attempts.push_back(now);
            true
        } else {
            false
        }
    }

    /// Attempts still available. Call [`prune`](Self::prune) first.
    pub fn remaining(&self, max: u32) -> u32 {
        max.saturating_sub(self.attempts.len() as u32)
    }

    /// How long until the next attempt would be admitted, `None` if one
    /// would be admitted now. Call [`prune`](Self::prune) first.
    pub fn retry_after(&self, now: Instant, window: Duration, max: u32) -> Option<Duration> {
        if self.attempts.len() < max as usize {
            return None;
        }
        // The slot frees up when the oldest blocking attempt ages out.
        let blocking = self.attempts.len() - max as usize;
        self.attempts
            .get(blocking)
            .map(|&t| (t + window).saturating_duration_since(now))
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(300);

    #[test]
    fn test_denied_attempts_not_recorded() {
        let now = Instant::now();
        let mut w = AttemptWindow::default();
        let results: Vec<bool> = (0..5).map(|_| w.try_record(now, WINDOW, 3)).collect();
        assert_eq!(results, vec![true, true, true, false, false]);
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn test_attempt_exactly_window_old_is_dropped() {
        let start = Instant::now();
        let mut w = AttemptWindow::default();
        assert!(w.try_record(start, WINDOW, 1));
        assert!(!w.try_record(start + WINDOW - Duration::from_millis(1), WINDOW, 1));
        assert!(w.try_record(start + WINDOW, WINDOW, 1));
    }

    #[test]
    fn test_retry_after_points_at_oldest() {
        let start = Instant::now();
        let mut w = AttemptWindow::default();
        w.try_record(start, WINDOW, 2);
        w.try_record(start + Duration::from_secs(10), WINDOW, 2);

        let now = start + Duration::from_secs(60);
        assert_eq!(w.retry_after(now, WINDOW, 2), Some(Duration::from_secs(240)));
        assert_eq!(w.remaining(2), 0);
        assert_eq!(w.retry_after(now, WINDOW, 3), None);
    }
}
