// Reads a JSON array of ensemble scores and prints the p-value report for
// one tracked statistic, optionally with a histogram of the ensemble.
// External-collaborator layer: all file reading and printing lives here,
// outside the core.

use std::error::Error;
use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chaintally::{p_value_report, Histogram};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a JSON array of ensemble scores
    scores_path: String,

    /// Score of the initial (typically real-world) plan
    #[arg(long)]
    initial: f64,

    /// Label for the tracked statistic
    #[arg(long, default_value = "score")]
    name: String,

    /// Number of histogram bins (requires --low and --high)
    #[arg(long)]
    bins: Option<usize>,

    /// Histogram lower bound (inclusive)
    #[arg(long)]
    low: Option<f64>,

    /// Histogram upper bound (exclusive)
    #[arg(long)]
    high: Option<f64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("score_report: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let raw = fs::read_to_string(&args.scores_path)?;
    let scores: Vec<f64> = serde_json::from_str(&raw)?;
    info!(
        count = scores.len(),
        path = %args.scores_path,
        "loaded ensemble scores"
    );

    let report = p_value_report(&args.name, scores.iter().copied(), args.initial)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let (Some(bins), Some(low), Some(high)) = (args.bins, args.low, args.high) {
        let histogram = Histogram::new((low, high), bins)?;
        let counts = histogram.count(scores.iter().copied())?;
        for (index, count) in &counts {
            let (start, end) = histogram.bins()[*index];
            println!("[{start:>10.4}, {end:>10.4})  {count}");
        }
    }

    Ok(())
}
