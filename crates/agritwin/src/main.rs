use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use agritwin::{
    ApiClient, DEBOUNCE_WINDOW, DashboardSession, ProjectionOutcome, ProjectionWorker,
    ReadingSource, Scenario, init_logging,
};
use agritwin_core::analysis::sensitivity_scan;
use agritwin_core::fallback::offline_results;
use agritwin_core::model::{InterventionCatalog, ModelParams, ProjectionResults};

#[derive(Parser, Debug)]
#[command(name = "agritwin")]
#[command(about = "Policy-scenario projection client for the agricultural digital twin")]
struct Args {
    /// Base URL of the projection service
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    server_url: String,

    /// Path to the data directory (default: ~/.agritwin/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Scenario file (YAML); without one, every intervention sits at its
    /// dashboard default target
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Skip the network entirely and synthesize results locally
    #[arg(long)]
    offline: bool,

    /// Print the marginal-impact ranking of all interventions
    #[arg(long)]
    sensitivity: bool,

    /// Override the projection target year
    #[arg(long)]
    target_year: Option<i32>,

    /// Override the Monte Carlo simulation count
    #[arg(long)]
    n_simulations: Option<u32>,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".agritwin")
}

/// How long to wait for the worker: debounce plus the request timeout with
/// some slack.
const OUTCOME_WAIT: Duration = Duration::from_secs(45);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
    let _log_guard = init_logging(&data_dir, &args.log_level)?;

    let mut session = DashboardSession::new(ModelParams::default(), InterventionCatalog::default());

    let client = if args.offline {
        None
    } else {
        let client = ApiClient::new(args.server_url.clone())?;
        match client.fetch_model_params() {
            Ok(update) => {
                if let Err(e) = session.sync_params(&update) {
                    tracing::warn!("rejected server parameters, keeping defaults: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("parameter fetch failed, using built-in defaults: {e}");
            }
        }
        Some(client)
    };

    if let Some(path) = &args.scenario {
        let scenario = Scenario::load(path)?;
        for (name, raw) in &scenario.interventions {
            session.set_intervention(name, *raw);
        }
        if let Some(year) = scenario.target_year {
            session.set_target_year(year);
        }
        if let Some(n) = scenario.n_simulations {
            session.set_n_simulations(n);
        }
    }
    if let Some(year) = args.target_year {
        session.set_target_year(year);
    }
    if let Some(n) = args.n_simulations {
        session.set_n_simulations(n);
    }

    match session.reading() {
        Some(reading) => {
            println!(
                "Estimated probability of reaching ${:.0} by {}: {:.1}%",
                session.params().target_ag_ppp,
                session.target_year(),
                reading.value * 100.0
            );
        }
        None => println!("No usable local estimate for this scenario"),
    }

    if let Some(client) = client {
        let (seq, request) = session.next_request();
        let mut worker = ProjectionWorker::spawn(
            client,
            session.params().clone(),
            session.catalog().clone(),
        );
        worker.send(seq, request);

        match worker.recv_timeout(DEBOUNCE_WINDOW + OUTCOME_WAIT) {
            Some(ProjectionOutcome::Complete { seq, results }) => {
                session.apply_remote(seq, &results);
                print_results("server Monte Carlo", &results);
            }
            Some(ProjectionOutcome::Fallback {
                results, error, ..
            }) => {
                tracing::warn!("showing locally synthesized results: {error}");
                print_results("local fallback", &results);
            }
            Some(ProjectionOutcome::Failed { error, .. }) => {
                tracing::error!("projection failed with no usable fallback: {error}");
            }
            None => {
                tracing::warn!("no projection result within the wait window");
            }
        }
        worker.shutdown();
    } else {
        let mut rng = rand::rng();
        let results = offline_results(
            session.settings(),
            session.catalog(),
            session.params(),
            session.target_year(),
            session.n_simulations() as usize,
            &mut rng,
        )?;
        print_results("offline", &results);
    }

    if let Some(reading) = session.reading() {
        let label = match reading.source {
            ReadingSource::Estimate => "estimate",
            ReadingSource::Final => "final",
        };
        println!(
            "Probability ({label}): {:.1}%",
            reading.value * 100.0
        );
    }

    if args.sensitivity {
        print_sensitivity(&session)?;
    }

    tracing::info!("shutting down");
    Ok(())
}

fn print_results(source: &str, results: &ProjectionResults) {
    println!("\nProjection results ({source}):");
    println!("  probability : {:.1}%", results.probability * 100.0);
    println!("  mean PPP    : ${:.0}", results.mean_ppp);
    println!("  median PPP  : ${:.0}", results.median_ppp);
    println!(
        "  p5 / p50 / p95 : ${:.0} / ${:.0} / ${:.0}",
        results.quantiles.p5, results.quantiles.p50, results.quantiles.p95
    );
    if results.drift != 0.0 || results.volatility != 0.0 {
        println!(
            "  drift {:.4}, volatility {:.4}",
            results.drift, results.volatility
        );
    }
    println!("  samples     : {}", results.distribution.len());
}

fn print_sensitivity(session: &DashboardSession) -> color_eyre::Result<()> {
    let entries = sensitivity_scan(
        session.settings(),
        session.catalog(),
        session.params(),
        session.target_year(),
    )?;

    println!("\nMarginal impact of maxing out each intervention:");
    for entry in entries {
        println!(
            "  {:+6.2} pp  {:<60} [{}] cost {:.0}",
            entry.marginal_impact * 100.0,
            entry.name,
            entry.category.label(),
            entry.cost
        );
    }
    Ok(())
}
