use crate::commands::{parse_date, render_analysis, render_benchmark, render_history};
use crate::infra::build_service;
use chrono::{Local, NaiveDate};
use clap::Args;
use rubric_assess::assessment::NoiseMode;
use rubric_assess::config::AppConfig;
use rubric_assess::error::AppError;
use std::collections::BTreeMap;

const DEMO_SUBCOMPONENT: &str = "value-proposition";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for reproducible demo output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Days of synthetic history to chart
    #[arg(long, default_value_t = 14)]
    pub(crate) days: u32,
    /// Override the reporting date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, days, today } = args;

    let mut config = AppConfig::load()?;
    config.engine.noise = seed.map(NoiseMode::Seeded).unwrap_or(NoiseMode::Derived);
    let service = build_service(&config)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Worksheet assessment demo");
    println!("Scoring sample answers for '{DEMO_SUBCOMPONENT}'\n");
    let result = service.compute_analysis(DEMO_SUBCOMPONENT, demo_answers())?;
    render_analysis(&result);

    println!();
    let benchmark = service.estimate_benchmark(DEMO_SUBCOMPONENT, result.total_score)?;
    render_benchmark(&benchmark);

    println!();
    let points = service.simulate_history_until(DEMO_SUBCOMPONENT, days, today)?;
    render_history(DEMO_SUBCOMPONENT, &points);

    Ok(())
}

fn demo_answers() -> BTreeMap<String, String> {
    let mut answers = BTreeMap::new();
    answers.insert(
        "1_problem".to_string(),
        "Independent veterinary clinics spend six to eight hours every week chasing unpaid \
         invoices. The problem is sharpest for clinics with fewer than five vets, where the \
         practice manager also runs reception."
            .to_string(),
    );
    answers.insert(
        "2_evidence".to_string(),
        "We interviewed 14 practice managers and ran a survey with 62 responses. 71% said \
         collections were their most frustrating admin task and 40% had written off more \
         than $5,000 last year."
            .to_string(),
    );
    answers.insert(
        "3_differentiation".to_string(),
        "Existing practice-management suites bundle billing as an afterthought. We integrate \
         with their ledgers and automate reminders over SMS, which none of the incumbents do."
            .to_string(),
    );
    answers.insert("4_outcomes".to_string(), String::new());
    answers
}
