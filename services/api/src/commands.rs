use crate::infra::{build_service, read_answers};
use chrono::{Local, NaiveDate};
use clap::Args;
use rubric_assess::analytics::{BenchmarkResult, HistoryPoint};
use rubric_assess::assessment::{AnalysisResult, NoiseMode};
use rubric_assess::config::AppConfig;
use rubric_assess::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Worksheet (rubric subcomponent) id, e.g. value-proposition
    #[arg(long)]
    pub(crate) subcomponent: String,
    /// JSON object mapping worksheet field names to answer text
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Fix the scoring seed instead of the configured noise mode
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the full analysis as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BenchmarkArgs {
    #[arg(long)]
    pub(crate) subcomponent: String,
    /// Total worksheet score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub(crate) score: u32,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    #[arg(long)]
    pub(crate) subcomponent: String,
    /// Days of history before today
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(0..=365))]
    pub(crate) days: u32,
    /// Final date of the series (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = load_config(args.seed)?;
    let service = build_service(&config)?;
    let answers = read_answers(&args.input)?;

    let result = service.compute_analysis(&args.subcomponent, answers)?;
    if args.json {
        print_json(&result);
    } else {
        render_analysis(&result);
    }
    Ok(())
}

pub(crate) fn run_benchmark(args: BenchmarkArgs) -> Result<(), AppError> {
    let config = load_config(args.seed)?;
    let service = build_service(&config)?;

    let benchmark = service.estimate_benchmark(&args.subcomponent, args.score)?;
    render_benchmark(&benchmark);
    Ok(())
}

pub(crate) fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let config = load_config(args.seed)?;
    let service = build_service(&config)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let points = service.simulate_history_until(&args.subcomponent, args.days, today)?;
    render_history(&args.subcomponent, &points);
    Ok(())
}

pub(crate) fn run_rubrics() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config)?;

    println!("Available worksheets");
    for summary in service.rubrics() {
        println!(
            "- {} ({}, {} dimensions)",
            summary.subcomponent_id, summary.display_name, summary.dimension_count
        );
    }
    Ok(())
}

fn load_config(seed: Option<u64>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(seed) = seed {
        config.engine.noise = NoiseMode::Seeded(seed);
    }
    Ok(config)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}

pub(crate) fn render_analysis(result: &AnalysisResult) {
    println!(
        "{} - {}/{} ({})",
        result.display_name,
        result.total_score,
        result.max_score,
        result.evaluation_tier.label()
    );
    println!("{}", result.evaluation_tier.narrative());

    println!("Dimension scores:");
    for score in &result.dimension_scores {
        println!(
            "  - {}: {}/{} ({:.0}%)",
            score.name,
            score.raw_score,
            score.weight,
            score.percentage * 100.0
        );
    }

    if result.recommendations.is_empty() {
        println!("Recommendations: none, every dimension sits in the middle band");
    } else {
        println!("Recommendations:");
        for item in &result.recommendations {
            match item.estimated_impact_points {
                Some(points) => println!("  - [{}] {} (+{} pts)", item.priority, item.text, points),
                None => println!("  - [{}] {}", item.priority, item.text),
            }
        }
    }

    for warning in &result.warnings {
        println!("Warning: {warning}");
    }
}

pub(crate) fn render_benchmark(benchmark: &BenchmarkResult) {
    println!(
        "Benchmark for {} (synthetic placeholder data)",
        benchmark.subcomponent_id
    );
    println!(
        "- Score {} | industry average {:.1} | top performers {:.1}",
        benchmark.subject_score, benchmark.industry_average, benchmark.top_performer_average
    );
    println!(
        "- {} percentile | {} | {:.1} points to top performers",
        benchmark.percentile_bucket, benchmark.status, benchmark.gap_to_top
    );
}

pub(crate) fn render_history(subcomponent_id: &str, points: &[HistoryPoint]) {
    println!("Score trend for {subcomponent_id} (synthetic placeholder data)");
    for point in points {
        println!("  {} {:>3}", point.date, point.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date(" 2025-02-03 "),
            Ok(NaiveDate::from_ymd_opt(2025, 2, 3).expect("valid date"))
        );
        assert!(parse_date("03/02/2025").is_err());
    }
}
