//! Stopwatch for the current reading session.
//!
//! Minutes already accumulated for a book are carried in when the timer
//! starts, so `total_minutes` reports the book's lifetime reading time.

use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ReadingTimer {
    carried_minutes: u64,
    /// A session was started and not yet stopped.
    open: bool,
    /// Elapsed time banked by earlier run segments (before a pause).
    banked: Duration,
    running_since: Option<Instant>,
}

impl ReadingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Started but currently paused.
    pub fn is_paused(&self) -> bool {
        self.open && self.running_since.is_none()
    }

    pub fn start(&mut self, previous_total_minutes: u64) {
        self.start_at(previous_total_minutes, Instant::now());
    }

    /// Begin timing. A paused session keeps its elapsed time.
    pub fn start_at(&mut self, previous_total_minutes: u64, now: Instant) {
        if self.is_running() {
            return;
        }
        if !self.open {
            self.banked = Duration::ZERO;
        }
        self.carried_minutes = previous_total_minutes;
        self.open = true;
        self.running_since = Some(now);
        debug!(carried = previous_total_minutes, "Reading timer started");
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn pause_at(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.banked += now.saturating_duration_since(since);
        }
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn resume_at(&mut self, now: Instant) {
        if self.open && self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn stop(&mut self) -> u64 {
        self.stop_at(Instant::now())
    }

    /// Stop the session and return the book's total minutes.
    pub fn stop_at(&mut self, now: Instant) -> u64 {
        let total = self.total_minutes_at(now);
        self.running_since = None;
        self.open = false;
        self.banked = Duration::ZERO;
        debug!(total_minutes = total, "Reading timer stopped");
        total
    }

    /// Forget the session and the carried-over minutes.
    pub fn reset(&mut self) {
        *self = ReadingTimer::default();
        debug!("Reading timer reset");
    }

    pub fn current_session(&self) -> Duration {
        self.current_session_at(Instant::now())
    }

    pub fn current_session_at(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.banked + now.saturating_duration_since(since),
            None => self.banked,
        }
    }

    /// Whole minutes of the current session.
    pub fn session_minutes_at(&self, now: Instant) -> u64 {
        self.current_session_at(now).as_secs() / 60
    }

    pub fn total_minutes(&self) -> u64 {
        self.total_minutes_at(Instant::now())
    }

    pub fn total_minutes_at(&self, now: Instant) -> u64 {
        self.carried_minutes + self.session_minutes_at(now)
    }
}

/// `HH:MM:SS` label for the reader's clock.
pub fn format_session(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn carries_previous_minutes() {
        let t0 = Instant::now();
        let mut timer = ReadingTimer::new();
        timer.start_at(30, t0);
        assert!(timer.is_running());
        assert_eq!(timer.total_minutes_at(t0 + MINUTE * 5 + Duration::from_secs(59)), 35);
        assert_eq!(timer.stop_at(t0 + MINUTE * 5), 35);
        assert!(!timer.is_running());
    }

    #[test]
    fn pause_excludes_idle_time() {
        let t0 = Instant::now();
        let mut timer = ReadingTimer::new();
        timer.start_at(0, t0);
        timer.pause_at(t0 + MINUTE * 2);
        timer.pause_at(t0 + MINUTE * 3);
        assert!(timer.is_paused());
        timer.resume_at(t0 + MINUTE * 10);
        timer.resume_at(t0 + MINUTE * 11);
        assert_eq!(timer.current_session_at(t0 + MINUTE * 13), MINUTE * 5);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let t0 = Instant::now();
        let mut timer = ReadingTimer::new();
        timer.start_at(10, t0);
        timer.start_at(99, t0 + MINUTE);
        assert_eq!(timer.total_minutes_at(t0 + MINUTE * 2), 12);
    }

    #[test]
    fn start_after_pause_keeps_elapsed_time() {
        let t0 = Instant::now();
        let mut timer = ReadingTimer::new();
        timer.start_at(4, t0);
        timer.pause_at(t0 + MINUTE * 3);
        timer.start_at(4, t0 + MINUTE * 10);
        assert!(timer.is_running());
        assert_eq!(timer.current_session_at(t0 + MINUTE * 12), MINUTE * 5);
        assert_eq!(timer.stop_at(t0 + MINUTE * 12), 9);

        timer.start_at(9, t0 + MINUTE * 20);
        assert_eq!(timer.current_session_at(t0 + MINUTE * 21), MINUTE);
    }

    #[test]
    fn reset_clears_session_and_carried_minutes() {
        let t0 = Instant::now();
        let mut timer = ReadingTimer::new();
        timer.start_at(30, t0);
        timer.pause_at(t0 + MINUTE * 2);
        timer.reset();
        assert!(!timer.is_running());
        assert!(!timer.is_paused());
        assert_eq!(timer.current_session(), Duration::ZERO);
        assert_eq!(timer.total_minutes(), 0);

        timer.start(0);
        assert!(timer.is_running());
        assert_eq!(timer.stop(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn formats_clock() {
        assert_eq!(format_session(Duration::from_secs(3725)), "01:02:05");
    }
}
