//! Hourly Series Module
//! Timestamp lookup and day slicing over the hourly forecast block.

use crate::charts::SeriesData;
use crate::forecast::HourlyBlock;
use chrono::{NaiveDateTime, Timelike};
use std::ops::Range;

pub const HOURS_PER_DAY: usize = 24;

/// Parse Open-Meteo local timestamps (`2024-05-01T13:00`, seconds optional).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
}

/// `HH:MM` part of a timestamp, or the whole string if it has no time part.
pub fn hour_label(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .map(|(_, time)| time)
        .unwrap_or(timestamp)
}

impl HourlyBlock {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Index of the timestamp closest to `at`; ties go to the earlier hour.
    /// Timestamps that don't parse are ignored.
    pub fn nearest_index(&self, at: NaiveDateTime) -> Option<usize> {
        self.time
            .iter()
            .enumerate()
            .filter_map(|(i, t)| parse_timestamp(t).map(|ts| (i, (ts - at).num_seconds().abs())))
            .min_by_key(|&(i, distance)| (distance, i))
            .map(|(i, _)| i)
    }

    /// Hourly indices of forecast day `day` (day 0 is the first 24 entries),
    /// clamped to the data available.
    pub fn day_range(&self, day: usize) -> Range<usize> {
        let start = day.saturating_mul(HOURS_PER_DAY).min(self.len());
        let end = start.saturating_add(HOURS_PER_DAY).min(self.len());
        start..end
    }

    /// Number of complete days in the block.
    pub fn full_days(&self) -> usize {
        self.len() / HOURS_PER_DAY
    }

    /// Hours worth showing for `day`: every hour of future days, and for
    /// today only the hours from the current one on.
    pub fn upcoming_in_day(&self, day: usize, now: NaiveDateTime) -> Vec<usize> {
        self.day_range(day)
            .filter(|&i| {
                day != 0
                    || parse_timestamp(&self.time[i]).map_or(true, |ts| ts.hour() >= now.hour())
            })
            .collect()
    }

    /// Up to `hours` entries starting at `start`, clamped to the data.
    pub fn window(&self, start: usize, hours: usize) -> Range<usize> {
        let start = start.min(self.len());
        start..start.saturating_add(hours).min(self.len())
    }

    /// Chart input for `column` over `range`, labelled `HH:MM`.
    /// Entries missing from a short column stay as gaps.
    pub fn series(&self, column: &[Option<f64>], range: Range<usize>) -> SeriesData {
        let range = range.start.min(self.len())..range.end.min(self.len());
        SeriesData::new(
            self.time[range.clone()].iter().map(|t| hour_label(t)),
            range.map(|i| column.get(i).copied().flatten()),
        )
    }

    /// `YYYY-MM-DD` of the first hour of `day`.
    pub fn day_label(&self, day: usize) -> Option<&str> {
        let range = self.day_range(day);
        if range.is_empty() {
            return None;
        }
        let stamp = self.time[range.start].as_str();
        Some(stamp.split_once('T').map(|(date, _)| date).unwrap_or(stamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(days: usize) -> HourlyBlock {
        let time: Vec<String> = (0..days * HOURS_PER_DAY)
            .map(|i| format!("2024-05-{:02}T{:02}:00", 1 + i / 24, i % 24))
            .collect();
        let temperature_2m = (0..time.len()).map(|i| Some(i as f64)).collect();
        HourlyBlock {
            time,
            temperature_2m,
            ..Default::default()
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-05-01T13:00").is_some());
        assert!(parse_timestamp("2024-05-01T13:00:30").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_nearest_index() {
        let hourly = block(2);
        assert_eq!(hourly.nearest_index(at("2024-05-01T05:10")), Some(5));
        assert_eq!(hourly.nearest_index(at("2024-05-01T05:50")), Some(6));
        // Exactly between two hours resolves to the earlier one
        assert_eq!(hourly.nearest_index(at("2024-05-01T05:30")), Some(5));
        // Before and after the series clamp to its ends
        assert_eq!(hourly.nearest_index(at("2024-04-20T00:00")), Some(0));
        assert_eq!(hourly.nearest_index(at("2024-06-01T00:00")), Some(47));
    }

    #[test]
    fn test_nearest_index_skips_garbage() {
        let hourly = HourlyBlock {
            time: vec!["bad".into(), "2024-05-01T03:00".into()],
            ..Default::default()
        };
        assert_eq!(hourly.nearest_index(at("2024-05-01T00:00")), Some(1));
        assert_eq!(HourlyBlock::default().nearest_index(at("2024-05-01T00:00")), None);
    }

    #[test]
    fn test_day_range_clamps() {
        let mut hourly = block(2);
        assert_eq!(hourly.day_range(1), 24..48);
        assert_eq!(hourly.day_range(5), 48..48);
        hourly.time.truncate(30);
        assert_eq!(hourly.day_range(1), 24..30);
        assert_eq!(hourly.full_days(), 1);
    }

    #[test]
    fn test_upcoming_in_day_hides_past_hours_today() {
        let hourly = block(2);
        let now = at("2024-05-01T22:15");
        assert_eq!(hourly.upcoming_in_day(0, now), vec![22, 23]);
        assert_eq!(hourly.upcoming_in_day(1, now).len(), 24);
    }

    #[test]
    fn test_series_labels_and_gaps() {
        let hourly = block(1);
        let column = vec![Some(1.0), None];
        let data = hourly.series(&column, hourly.window(0, 3));
        assert_eq!(data.labels.len(), 3);
        assert_eq!(data.labels[1].to_string(), "01:00");
        assert_eq!(data.series, vec![Some(1.0), None, None]);
    }

    #[test]
    fn test_day_label() {
        let hourly = block(2);
        assert_eq!(hourly.day_label(1), Some("2024-05-02"));
        assert_eq!(hourly.day_label(2), None);
    }

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label("2024-05-01T07:00"), "07:00");
        assert_eq!(hour_label("07:00"), "07:00");
    }
}
