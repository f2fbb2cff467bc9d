//! Reading statistics: daily minutes and reading streaks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Key format of the per-day minutes map.
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingStatistics {
    pub total_reading_minutes: u64,
    pub today_reading_minutes: u64,
    pub books_read: u32,
    pub total_chapters_read: u32,
    pub last_reading_date: Option<NaiveDate>,
    /// `YYYY-MM-DD` to minutes read that day.
    pub daily_reading_minutes: BTreeMap<String, u64>,
    /// Characters per minute.
    pub average_reading_speed: u32,
    pub longest_streak: u32,
    pub current_streak: u32,
}

impl ReadingStatistics {
    /// Add `minutes` read on `today`, rolling the day and streak first.
    pub fn record_minutes(&mut self, today: NaiveDate, minutes: u64) {
        self.roll_day(today);
        self.today_reading_minutes += minutes;
        self.total_reading_minutes += minutes;
        *self
            .daily_reading_minutes
            .entry(today.format(DAY_KEY_FORMAT).to_string())
            .or_insert(0) += minutes;
        debug!(
            %today,
            minutes,
            streak = self.current_streak,
            "Recorded reading minutes"
        );
    }

    pub fn record_chapter_read(&mut self) {
        self.total_chapters_read += 1;
    }

    pub fn record_book_finished(&mut self) {
        self.books_read += 1;
    }

    /// Update the reading speed estimate from a finished session.
    pub fn record_speed(&mut self, chars_read: usize, minutes: u64) {
        if minutes == 0 || chars_read == 0 {
            return;
        }
        let speed = (chars_read as u64 / minutes).min(u32::MAX as u64) as u32;
        self.average_reading_speed = if self.average_reading_speed == 0 {
            speed
        } else {
            (self.average_reading_speed + speed) / 2
        };
    }

    /// Minutes read on `today`; zero if the last recorded day is older.
    pub fn minutes_on(&self, today: NaiveDate) -> u64 {
        if self.last_reading_date == Some(today) {
            self.today_reading_minutes
        } else {
            0
        }
    }

    fn roll_day(&mut self, today: NaiveDate) {
        if self.last_reading_date == Some(today) {
            return;
        }
        let days_since = self
            .last_reading_date
            .map(|last| (today - last).num_days());
        self.today_reading_minutes = 0;
        match days_since {
            Some(1) => self.current_streak += 1,
            // Clock moved backwards: keep the streak as is.
            Some(days) if days < 1 => {}
            _ => self.current_streak = 1,
        }
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_reading_date = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn first_reading_day_starts_streak() {
        let mut stats = ReadingStatistics::default();
        stats.record_minutes(day(1), 15);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.today_reading_minutes, 15);
        assert_eq!(stats.daily_reading_minutes.get("2024-03-01"), Some(&15));
    }

    #[test]
    fn same_day_accumulates_without_touching_streak() {
        let mut stats = ReadingStatistics::default();
        stats.record_minutes(day(1), 10);
        stats.record_minutes(day(1), 5);
        assert_eq!(stats.today_reading_minutes, 15);
        assert_eq!(stats.total_reading_minutes, 15);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn consecutive_days_extend_streak() {
        let mut stats = ReadingStatistics::default();
        stats.record_minutes(day(1), 10);
        stats.record_minutes(day(2), 20);
        stats.record_minutes(day(3), 5);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.today_reading_minutes, 5);
        assert_eq!(stats.total_reading_minutes, 35);
        assert_eq!(stats.minutes_on(day(3)), 5);
        assert_eq!(stats.minutes_on(day(4)), 0);
    }

    #[test]
    fn gap_resets_current_streak_only() {
        let mut stats = ReadingStatistics::default();
        stats.record_minutes(day(1), 10);
        stats.record_minutes(day(2), 10);
        stats.record_minutes(day(5), 10);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.daily_reading_minutes.len(), 3);
    }

    #[test]
    fn clock_moving_backwards_keeps_streak() {
        let mut stats = ReadingStatistics::default();
        stats.record_minutes(day(3), 10);
        stats.record_minutes(day(4), 10);
        stats.record_minutes(day(2), 7);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.today_reading_minutes, 7);
        assert_eq!(stats.last_reading_date, Some(day(2)));
        assert_eq!(stats.total_reading_minutes, 27);
    }

    #[test]
    fn speed_averages_sessions() {
        let mut stats = ReadingStatistics::default();
        stats.record_speed(3000, 10);
        assert_eq!(stats.average_reading_speed, 300);
        stats.record_speed(5000, 10);
        assert_eq!(stats.average_reading_speed, 400);
        stats.record_speed(100, 0);
        assert_eq!(stats.average_reading_speed, 400);
    }
}
