//! ipcwatch simulation CLI
//!
//! Drives the IPC dashboard engine: headless deterministic runs with an
//! optional JSON export, or a live ratatui dashboard (with the
//! `dashboard` feature).

use clap::Parser;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use ipcwatch_core::DashboardStats;
use ipcwatch_sim::{SimConfig, SimExport, SimWorld};

/// IPC activity dashboard simulator
#[derive(Parser, Debug)]
#[command(name = "ipcwatch-sim")]
#[command(about = "Simulate IPC activity for the ipcwatch dashboard", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = derive from wall clock)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of simulated processes (name pool holds 10)
    #[arg(short, long, default_value = "8")]
    processes: usize,

    /// Simulated duration in seconds
    #[arg(short, long, default_value = "60")]
    duration: u64,

    /// Run the live TUI dashboard instead of a headless run
    #[arg(long)]
    dashboard: bool,

    /// Export per-second stat frames to a JSON file
    #[arg(long)]
    export: Option<String>,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Remote stats endpoint to poll each refresh (optional enrichment)
    #[arg(long)]
    stats_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Polls the remote endpoint when configured, falling back to the
/// locally computed stats on any failure.
fn effective_stats(local: DashboardStats, poller: Option<&RemotePoller>) -> DashboardStats {
    match poller {
        Some(poller) => poller.poll().unwrap_or(local),
        None => local,
    }
}

#[cfg(feature = "remote-stats")]
type RemotePoller = ipcwatch_sim::StatsPoller;

#[cfg(not(feature = "remote-stats"))]
struct RemotePoller;

#[cfg(not(feature = "remote-stats"))]
impl RemotePoller {
    fn poll(&self) -> Option<DashboardStats> {
        None
    }
}

fn build_poller(url: Option<&str>) -> Option<RemotePoller> {
    let url = url?;

    #[cfg(feature = "remote-stats")]
    {
        match ipcwatch_sim::StatsPoller::new(url) {
            Ok(poller) => Some(poller),
            Err(err) => {
                error!(error = %err, "could not build stats client; polling disabled");
                None
            }
        }
    }

    #[cfg(not(feature = "remote-stats"))]
    {
        error!(
            url,
            "built without the remote-stats feature; --stats-url ignored"
        );
        None
    }
}

fn run_headless(mut world: SimWorld, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let poller = build_poller(args.stats_url.as_deref());
    let mut export = args.export.as_ref().map(|_| SimExport::new(world.config().seed));

    for _ in 0..args.duration {
        let report = world.tick()?;

        if let Some(export) = export.as_mut() {
            let stats = effective_stats(world.stats(), poller.as_ref());
            export.add_frame(world.uptime_secs(), stats);
        }

        if report.tick % 30 == 0 {
            debug!(
                tick = report.tick,
                events = world.history().event_count(),
                issues = world.history().issue_count(),
                "progress"
            );
        }
    }

    let stats = effective_stats(world.stats(), poller.as_ref());

    if let (Some(export), Some(path)) = (export.as_mut(), args.export.as_deref()) {
        export.finalize(stats);
        export.write_to_file(path)?;
        info!(path, frames = export.frames.len(), "exported run");
    }

    if args.json {
        let summary = serde_json::json!({
            "seed": world.config().seed,
            "ticks": world.tick_count(),
            "events_generated": world.events_generated(),
            "issues_generated": world.issues_generated(),
            "issues_resolved": world.issues_resolved(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!(
            "run complete: {} ticks, {} events, {} issues ({} resolved)",
            world.tick_count(),
            world.events_generated(),
            world.issues_generated(),
            world.issues_resolved()
        );
        info!(
            "final stats: {} events in window, {} active procs, {:.2}ms avg latency, {} active issues",
            stats.total_events, stats.active_processes, stats.avg_latency_ms, stats.active_issues
        );
    }

    Ok(())
}

#[cfg(feature = "dashboard")]
fn run_dashboard(mut world: SimWorld, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    use ipcwatch_core::{EventFilter, IpcDashboard, MetricPacket};

    let poller = build_poller(args.stats_url.as_deref());
    let (tx, rx) = crossbeam::channel::bounded::<MetricPacket>(16);

    // Producer thread: one real second per tick; exits once the
    // dashboard drops the receiver.
    let producer = std::thread::spawn(move || {
        loop {
            std::thread::sleep(std::time::Duration::from_secs(1));
            if world.tick().is_err() {
                break;
            }

            let mut view = world.view(&EventFilter::default());
            view.stats = effective_stats(view.stats, poller.as_ref());

            let packet = MetricPacket {
                uptime_secs: world.uptime_secs(),
                view,
            };
            if tx.send(packet).is_err() {
                break;
            }
        }
    });

    let mut dashboard = IpcDashboard::new(rx);
    dashboard.run()?;
    drop(dashboard);
    let _ = producer.join();

    Ok(())
}

#[cfg(not(feature = "dashboard"))]
fn run_dashboard(_world: SimWorld, _args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    Err("rebuild with --features dashboard to use the live TUI".into())
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    } else {
        args.seed
    };

    let config = SimConfig {
        seed,
        num_processes: args.processes,
        ..SimConfig::default()
    };

    if !args.json {
        info!("ipcwatch simulator");
        info!(seed, processes = args.processes, duration = args.duration, "starting");
    }

    let world = match SimWorld::new(config) {
        Ok(world) => world,
        Err(err) => {
            error!("failed to start simulation: {}", err);
            std::process::exit(1);
        }
    };

    let result = if args.dashboard {
        run_dashboard(world, &args)
    } else {
        run_headless(world, &args)
    };

    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}
