use crate::commands::{
    run_analyze, run_benchmark, run_history, run_rubrics, AnalyzeArgs, BenchmarkArgs, HistoryArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rubric_assess::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rubric Assessment Service",
    about = "Score self-assessment worksheets against weighted rubrics from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a worksheet answers file against a rubric
    Analyze(AnalyzeArgs),
    /// Compare a score with synthetic peer statistics
    Benchmark(BenchmarkArgs),
    /// Print a synthetic score trend for demo charts
    History(HistoryArgs),
    /// List the worksheets the rubric catalogue can score
    Rubrics,
    /// Walk through scoring, benchmarking, and history with sample answers
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Benchmark(args) => run_benchmark(args),
        Command::History(args) => run_history(args),
        Command::Rubrics => run_rubrics(),
        Command::Demo(args) => run_demo(args),
    }
}
