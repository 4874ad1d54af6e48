//! RelapsePredNet CLI
//!
//! Terminal dashboard over the phone-side sensor log.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use relapse_prednet::{
    config::Config,
    core::{try_latest_hourly_metrics, LineRecovery},
    dashboard::{query_metrics, render, DashboardState, IntakeState},
    prediction::SimulatedPredictor,
    stats::create_shared_stats,
    DISCLAIMER, VERSION,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relapse-prednet")]
#[command(version = VERSION)]
#[command(about = "Mobile sensing-based relapse prediction dashboard", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard once
    Show {
        /// Sensor log path (defaults to the configured log)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Social Functioning Scale score (0-150)
        #[arg(long)]
        sfs: Option<u8>,

        /// Patient age (18-100)
        #[arg(long)]
        age: Option<u8>,

        /// Generate a relapse prediction
        #[arg(long)]
        predict: bool,
    },

    /// Print the latest hourly averages
    Metrics {
        /// Sensor log path (defaults to the configured log)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Re-render the dashboard until interrupted
    Watch {
        /// Sensor log path (defaults to the configured log)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Social Functioning Scale score (0-150)
        #[arg(long)]
        sfs: Option<u8>,

        /// Patient age (18-100)
        #[arg(long)]
        age: Option<u8>,

        /// Seconds between render cycles
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Show or update configuration
    Config {
        /// Set the sensor log path
        #[arg(long)]
        log_path: Option<PathBuf>,

        /// Set the line recovery policy (strict or skip_trailing)
        #[arg(long)]
        recovery: Option<String>,

        /// Set the display timezone (IANA name)
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Display the demonstration disclaimer
    Disclaimer,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Show {
            log,
            sfs,
            age,
            predict,
        } => cmd_show(log, sfs, age, predict),
        Commands::Metrics { log, format } => cmd_metrics(log, &format),
        Commands::Watch {
            log,
            sfs,
            age,
            interval,
        } => cmd_watch(log, sfs, age, interval),
        Commands::Config {
            log_path,
            recovery,
            timezone,
        } => cmd_config(log_path, recovery, timezone),
        Commands::Disclaimer => {
            println!("{DISCLAIMER}");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        tracing::warn!("Could not load config, using defaults: {e}");
        Config::default()
    })
}

fn dashboard_state(
    config: &Config,
    sfs: Option<u8>,
    age: Option<u8>,
) -> anyhow::Result<DashboardState> {
    let intake = IntakeState::new(
        sfs.unwrap_or(config.default_sfs_score),
        age.unwrap_or(config.default_age),
    )?;
    let timezone = config.timezone().unwrap_or_else(|e| {
        tracing::warn!("{e}, falling back to UTC");
        chrono_tz::Tz::UTC
    });
    Ok(DashboardState::new(intake).with_timezone(timezone))
}

fn cmd_show(
    log: Option<PathBuf>,
    sfs: Option<u8>,
    age: Option<u8>,
    predict: bool,
) -> anyhow::Result<()> {
    let config = load_config();
    let log_path = log.unwrap_or_else(|| config.log_path.clone());
    let state = dashboard_state(&config, sfs, age)?.with_prediction(predict);

    let metrics = query_metrics(&log_path, config.line_recovery);
    let view = render(&state, metrics.as_ref(), &SimulatedPredictor);
    print!("{view}");
    Ok(())
}

fn cmd_metrics(log: Option<PathBuf>, format: &str) -> anyhow::Result<()> {
    let config = load_config();
    let log_path = log.unwrap_or_else(|| config.log_path.clone());

    let metrics = match try_latest_hourly_metrics(&log_path, config.line_recovery) {
        Ok(metrics) => metrics,
        Err(e) => {
            eprintln!("No live data: {e}");
            std::process::exit(1);
        }
    };

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&metrics).context("serializing metrics")?
        );
    } else {
        println!(
            "Hour {} - {} ({} readings)",
            metrics.bucket_start.format("%Y-%m-%d %H:%M"),
            metrics.bucket_end.format("%H:%M UTC"),
            metrics.reading_count
        );
        for (field, mean) in metrics.iter() {
            println!("  {field}: {mean}");
        }
    }
    Ok(())
}

fn cmd_watch(
    log: Option<PathBuf>,
    sfs: Option<u8>,
    age: Option<u8>,
    interval: Option<u64>,
) -> anyhow::Result<()> {
    let config = load_config();
    let log_path = log.unwrap_or_else(|| config.log_path.clone());
    let state = dashboard_state(&config, sfs, age)?;
    let interval = interval
        .map(Duration::from_secs)
        .unwrap_or(config.refresh_interval)
        .max(Duration::from_secs(1));

    let stats = create_shared_stats();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("setting Ctrl+C handler")?;

    tracing::info!(
        "Watching {} every {}s",
        log_path.display(),
        interval.as_secs()
    );

    let mut last_render: Option<Instant> = None;
    while running.load(Ordering::SeqCst) {
        if last_render.map_or(true, |t| t.elapsed() >= interval) {
            let metrics = query_metrics(&log_path, config.line_recovery);
            let view = render(&state, metrics.as_ref(), &SimulatedPredictor);
            stats.record_render(view.has_live_data(), state.predict_requested);

            // Clear screen and home the cursor.
            print!("\x1B[2J\x1B[H");
            print!("{view}");
            println!();
            println!("Refreshing every {}s. Press Ctrl+C to stop.", interval.as_secs());

            last_render = Some(Instant::now());
        }
        thread::sleep(Duration::from_millis(100));
    }

    println!();
    println!("{}", stats.summary());
    Ok(())
}

fn cmd_config(
    log_path: Option<PathBuf>,
    recovery: Option<String>,
    timezone: Option<String>,
) -> anyhow::Result<()> {
    let mut config = load_config();
    let updating = log_path.is_some() || recovery.is_some() || timezone.is_some();

    if let Some(path) = log_path {
        config.log_path = path;
    }
    if let Some(name) = recovery {
        match LineRecovery::from_name(&name) {
            Some(policy) => config.line_recovery = policy,
            None => bail!("Unknown recovery policy '{name}' (expected strict or skip_trailing)"),
        }
    }
    if let Some(tz) = timezone {
        config.display_timezone = tz;
        config.timezone()?;
    }

    if updating {
        config.save()?;
        println!("Configuration saved.");
        println!();
    }

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
