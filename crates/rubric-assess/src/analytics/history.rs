use super::HistorySource;
use crate::assessment::{NoiseMode, TOTAL_WEIGHT};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Longest series a caller may request.
pub const MAX_HISTORY_DAYS: u32 = 365;

const BASE_RANGE: (f64, f64) = (45.0, 75.0);
const TREND_GAIN: f64 = 15.0;
const JITTER_SPREAD: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub score: u32,
}

/// Demo trend line: random base, linear climb of fifteen points, daily jitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticHistory {
    noise: NoiseMode,
}

impl SyntheticHistory {
    pub fn new(noise: NoiseMode) -> Self {
        Self { noise }
    }
}

impl HistorySource for SyntheticHistory {
    fn history(&self, subcomponent_id: &str, days: u32, today: NaiveDate) -> Vec<HistoryPoint> {
        let days = days.min(MAX_HISTORY_DAYS);
        let mut noise = self.noise.source(&[
            subcomponent_id.as_bytes(),
            &days.to_le_bytes(),
            today.to_string().as_bytes(),
        ]);

        let base = noise.uniform(BASE_RANGE.0, BASE_RANGE.1);
        let start = today - Duration::days(i64::from(days));

        (0..=days)
            .map(|offset| {
                let progress = if days == 0 {
                    0.0
                } else {
                    f64::from(offset) / f64::from(days)
                };
                let trend = (base + TREND_GAIN * progress).round() as i64;
                let score = (trend + noise.jitter(JITTER_SPREAD)).clamp(0, i64::from(TOTAL_WEIGHT));

                HistoryPoint {
                    date: start + Duration::days(i64::from(offset)),
                    score: score as u32,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
    }

    #[test]
    fn produces_days_plus_one_points_ending_today() {
        let points = SyntheticHistory::default().history("value-proposition", 30, today());

        assert_eq!(points.len(), 31);
        assert_eq!(points.first().map(|p| p.date), NaiveDate::from_ymd_opt(2025, 5, 31));
        assert_eq!(points.last().map(|p| p.date), Some(today()));
        assert!(points.iter().all(|point| point.score <= 100));
        assert!(points.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn disabled_noise_draws_straight_trend() {
        let points = SyntheticHistory::new(NoiseMode::Disabled).history("x", 10, today());
        let scores: Vec<u32> = points.iter().map(|point| point.score).collect();

        assert_eq!(scores.first(), Some(&60));
        assert_eq!(scores.last(), Some(&75));
        assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn zero_days_yields_single_point() {
        let points = SyntheticHistory::default().history("x", 0, today());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, today());
    }

    #[test]
    fn caps_requested_window() {
        let points = SyntheticHistory::default().history("x", 10_000, today());
        assert_eq!(points.len(), MAX_HISTORY_DAYS as usize + 1);
    }

    #[test]
    fn seeded_series_stays_within_trend_band() {
        for seed in 0..50 {
            let points = SyntheticHistory::new(NoiseMode::Seeded(seed)).history("x", 20, today());
            assert!(points.iter().all(|point| (40..=95).contains(&point.score)));
        }
    }
}
