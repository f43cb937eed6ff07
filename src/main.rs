use anyhow::{Context, Result};
use clap::Parser;
use crosswalk::core::{formal_description, saturating_millis};
use crosswalk::driver::{Driver, DriverHandle};
use crosswalk::observer::LogObserver;
use crosswalk::{Settings, Snapshot};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Terminal host for the crossing controller.
///
/// Type `w` (or just press Enter) to push the walk button, `q` to quit.
#[derive(Debug, Parser)]
#[command(name = "crosswalk", version, about)]
struct Cli {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the tick cadence in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Print the formal machine description and exit
    #[arg(long)]
    diagram: bool,

    /// Print every snapshot as a JSON line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let settings = load_settings(&cli)?;

    if cli.diagram {
        print!("{}", formal_description(&settings.durations));
        return Ok(());
    }

    let mut controller = settings
        .build_controller()
        .context("invalid controller settings")?;
    controller.subscribe(LogObserver);

    info!(
        tick_ms = settings.tick_interval_ms,
        green_ms = saturating_millis(settings.durations.green),
        "starting crossing controller"
    );

    let handle = Driver::new(controller, settings.tick_interval())?.spawn();
    run_host(&handle, cli.json).await?;

    let controller = handle.shutdown().await?;
    info!(
        cycles = controller.history().cycles(),
        transitions = controller.history().total(),
        "bye"
    );
    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    settings = settings
        .with_env_overrides()
        .context("applying environment overrides")?;
    if let Some(ms) = cli.tick_ms {
        settings.tick_interval_ms = ms;
        settings.validate().context("invalid --tick-ms")?;
    }
    Ok(settings)
}

async fn run_host(handle: &DriverHandle, json: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut snapshots = handle.snapshots();
    let mut last_shown: Option<Snapshot> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("reading stdin")? {
                    None => break,
                    Some(input) => match input.trim() {
                        "" | "w" => handle.request_crossing().await?,
                        "q" => break,
                        other => warn!(input = other, "unknown command; use `w` or `q`"),
                    },
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = *snapshots.borrow_and_update();
                if json {
                    println!("{}", serde_json::to_string(&snap)?);
                } else if should_show(last_shown.as_ref(), &snap) {
                    println!(
                        "[{:>8}] {:<8} {}  {:>2}s{}",
                        snap.uptime_ms,
                        snap.phase.name(),
                        snap.outputs,
                        snap.remaining_secs,
                        if snap.request_queued { "  (walk requested)" } else { "" }
                    );
                }
                last_shown = Some(snap);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }
    Ok(())
}

/// Plain output only prints when the countdown, phase or latch moves.
fn should_show(last: Option<&Snapshot>, snap: &Snapshot) -> bool {
    match last {
        None => true,
        Some(prev) => {
            prev.phase != snap.phase
                || prev.remaining_secs != snap.remaining_secs
                || prev.request_queued != snap.request_queued
        }
    }
}
