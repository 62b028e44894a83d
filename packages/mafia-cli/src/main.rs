use anyhow::Context;
use dotenvy::dotenv;
use env_logger::Builder;
use log::LevelFilter;
use structopt::StructOpt;

use mafia_core::{
    models::config::SimulationConfig,
    services::simulation_service::{run_batch, run_simulation, BatchSummary, SimulationReport},
    Cause,
};

mod models;

use models::{Command, Opt};

// ログ設定
fn init_logger(verbose: bool) {
    let mut builder = Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var("RUST_LOG").is_err() {
        builder.filter_level(LevelFilter::Info);
    }
    builder
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_target(true)
        .init();
}

fn print_report(report: &SimulationReport) {
    println!("population: {} (seed {})", report.population, report.seed);
    for elimination in &report.eliminations {
        let how = match elimination.cause {
            Cause::Assassination => "assassinated".to_string(),
            Cause::Lynch { attempts, votes } => {
                format!("lynched with {} votes after {} attempt(s)", votes, attempts)
            }
            Cause::Removed => "removed".to_string(),
        };
        println!(
            "  round {}: resident {} ({}) {}",
            elimination.round, elimination.victim, elimination.faction, how
        );
    }
    println!("rounds: {}", report.rounds);
    println!("outcome: {:?}", report.outcome);
    println!(
        "alive adversaries: {}, alive townspeople: {}",
        report.alive_adversaries, report.alive_townspeople
    );
    for resident in &report.residents {
        println!("{}", resident);
    }
}

fn print_summary(summary: &BatchSummary) {
    println!("runs: {}", summary.runs);
    println!("completed: {}", summary.completed);
    println!("non-terminating: {}", summary.non_terminating);
    println!("no candidates: {}", summary.no_candidates);
    println!("adversary parity: {}", summary.adversary_parity);
    println!("adversaries eliminated: {}", summary.adversaries_eliminated);
    if let (Some(min), Some(max), Some(mean)) =
        (summary.min_rounds, summary.max_rounds, summary.mean_rounds)
    {
        println!("rounds: min {}, max {}, mean {:.2}", min, max, mean);
    }
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    // 環境変数をロード
    if let Err(e) = dotenv() {
        eprintln!("Warning: failed to load .env: {}", e);
    }
    init_logger(opt.verbose);

    let base = SimulationConfig::from_env();
    match opt.command {
        Command::Run { settings, json } => {
            let config = settings.apply(base);
            let report = run_simulation(&config).context("simulation failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Batch {
            settings,
            runs,
            json,
        } => {
            let config = settings.apply(base);
            let summary = run_batch(&config, runs).context("batch failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
    }

    Ok(())
}
