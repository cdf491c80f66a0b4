use super::BenchmarkSource;
use crate::assessment::{NoiseMode, TOTAL_WEIGHT};
use serde::{Deserialize, Serialize};
use std::fmt;

const INDUSTRY_AVERAGE_RANGE: (f64, f64) = (55.0, 70.0);
const TOP_PERFORMER_RANGE: (f64, f64) = (80.0, 95.0);

const PERCENTILE_STEPS: [(u32, &str); 6] = [
    (90, "95th"),
    (80, "85th"),
    (70, "70th"),
    (60, "55th"),
    (50, "40th"),
    (40, "25th"),
];
const LOWEST_PERCENTILE: &str = "15th";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkStatus {
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchmarkStatus::AboveAverage => f.write_str("Above Average"),
            BenchmarkStatus::BelowAverage => f.write_str("Below Average"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub subcomponent_id: String,
    pub subject_score: u32,
    pub industry_average: f64,
    pub top_performer_average: f64,
    pub percentile_bucket: String,
    pub gap_to_top: f64,
    pub status: BenchmarkStatus,
    /// Always true for [`SyntheticBenchmarks`]; the figures are not measured.
    pub synthetic: bool,
}

/// Fixed step function from score to percentile label.
pub fn percentile_bucket(score: u32) -> &'static str {
    PERCENTILE_STEPS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(LOWEST_PERCENTILE)
}

/// Placeholder peer statistics drawn from fixed ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticBenchmarks {
    noise: NoiseMode,
}

impl SyntheticBenchmarks {
    pub fn new(noise: NoiseMode) -> Self {
        Self { noise }
    }
}

impl BenchmarkSource for SyntheticBenchmarks {
    /// Scores above the rubric maximum are treated as the maximum.
    fn estimate(&self, subcomponent_id: &str, score: u32) -> BenchmarkResult {
        let score = score.min(TOTAL_WEIGHT);
        let mut noise = self
            .noise
            .source(&[subcomponent_id.as_bytes(), &score.to_le_bytes()]);

        let industry_average =
            floor_tenth(noise.uniform(INDUSTRY_AVERAGE_RANGE.0, INDUSTRY_AVERAGE_RANGE.1));
        let top_performer_average =
            floor_tenth(noise.uniform(TOP_PERFORMER_RANGE.0, TOP_PERFORMER_RANGE.1));

        let status = if f64::from(score) > industry_average {
            BenchmarkStatus::AboveAverage
        } else {
            BenchmarkStatus::BelowAverage
        };

        BenchmarkResult {
            subcomponent_id: subcomponent_id.to_string(),
            subject_score: score,
            industry_average,
            top_performer_average,
            percentile_bucket: percentile_bucket(score).to_string(),
            gap_to_top: round_tenth((top_performer_average - f64::from(score)).max(0.0)),
            status,
            synthetic: true,
        }
    }
}

// Flooring keeps a draw from [low, high) inside the half-open range.
fn floor_tenth(value: f64) -> f64 {
    (value * 10.0).floor() / 10.0
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
