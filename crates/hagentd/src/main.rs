//! hagentd - local health agent daemon.
//!
//! Samples network interfaces, memory, the default gateway and DNS lookups
//! on a fixed interval and publishes them in a hierarchical metrics tree.
//! Optionally dumps the tree as JSON after every cycle.

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use hagent_core::collector::RealFs;
use hagent_core::collector::procfs::{
    CommandPinger, GatewayProber, MemoryProber, NetIfProber, Pinger,
};
#[cfg(not(target_os = "linux"))]
use hagent_core::collector::mock::MockFs;
use hagent_core::collector::{Collector, CollectorTiming, DnsProber, FileSystem};
use hagent_core::metrics::{Directory, MetricsTree, RegistryError};

/// Local health agent daemon.
#[derive(Parser)]
#[command(name = "hagentd", about = "Local health agent daemon", version)]
struct Args {
    /// Probe interval in seconds.
    #[arg(
        short,
        long,
        default_value = "10",
        env = "HAGENT_INTERVAL",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc", env = "HAGENT_PROC_PATH")]
    proc_path: String,

    /// DNS lookup test as NAME=HOSTNAME. May be repeated.
    #[arg(long = "dns-test", value_name = "NAME=HOST", value_parser = parse_dns_test)]
    dns_tests: Vec<DnsTest>,

    /// Disable the default gateway prober.
    #[arg(long)]
    no_gateway: bool,

    /// Write a JSON snapshot of all metrics to this file after every cycle.
    #[arg(long, value_name = "PATH", env = "HAGENT_DUMP")]
    dump: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// A named DNS lookup test.
#[derive(Debug, Clone, PartialEq)]
struct DnsTest {
    name: String,
    host: String,
}

/// Parses a `NAME=HOSTNAME` DNS test specification.
fn parse_dns_test(s: &str) -> Result<DnsTest, String> {
    let (name, host) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=HOST, got '{}'", s))?;
    let (name, host) = (name.trim(), host.trim());
    if name.is_empty() || name.contains('/') {
        return Err(format!("invalid test name '{}'", name));
    }
    if host.is_empty() {
        return Err(format!("missing hostname for test '{}'", name));
    }
    Ok(DnsTest {
        name: name.to_string(),
        host: host.to_string(),
    })
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["hagentd", "hagent_core"] {
        match format!("{}={}", target, level).parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("invalid log directive for {}: {}", target, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Registers every configured prober in `tree`.
///
/// Layout: `/sys/netif`, `/sys/memory`, `/sys/network` and
/// `/health-checks/dns/<test>`. The gateway prober is only added when a
/// pinger is given.
fn build_collector<F: FileSystem + Clone + 'static>(
    fs: F,
    proc_path: &str,
    dns_tests: &[DnsTest],
    gateway: Option<Box<dyn Pinger>>,
    tree: &MetricsTree,
) -> Result<Collector, RegistryError> {
    let root = tree.root();
    let sys = root.register_directory("sys")?;

    let mut collector = Collector::new()
        .with_prober(Box::new(NetIfProber::new(
            fs.clone(),
            proc_path,
            sys.register_directory("netif")?,
        )))
        .with_prober(Box::new(MemoryProber::register(
            fs.clone(),
            proc_path,
            sys.register_directory("memory")?.as_ref(),
        )?));

    if let Some(pinger) = gateway {
        collector.add_prober(Box::new(GatewayProber::with_pinger(
            fs,
            proc_path,
            sys.register_directory("network")?.as_ref(),
            pinger,
        )?));
    }

    if !dns_tests.is_empty() {
        let dns = root
            .register_directory("health-checks")?
            .register_directory("dns")?;
        for test in dns_tests {
            collector.add_prober(Box::new(DnsProber::register(
                &test.name,
                &test.host,
                dns.as_ref(),
            )?));
        }
    }

    Ok(collector)
}

/// Describes a cycle for logging.
fn describe_cycle(timing: &CollectorTiming) -> String {
    let failed: Vec<&str> = timing
        .probes
        .iter()
        .filter(|p| p.error.is_some())
        .map(|p| p.name.as_str())
        .collect();

    if failed.is_empty() {
        format!("{} probers ok", timing.probes.len())
    } else {
        format!(
            "{} probers, {} failed ({})",
            timing.probes.len(),
            failed.len(),
            failed.join(", ")
        )
    }
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("hagentd {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, proc={}, dns_tests={}, gateway={}",
        args.interval,
        args.proc_path,
        args.dns_tests.len(),
        !args.no_gateway
    );

    #[cfg(target_os = "linux")]
    let fs = RealFs::new();
    #[cfg(not(target_os = "linux"))]
    let fs = MockFs::typical_system();

    let pinger: Option<Box<dyn Pinger>> = if args.no_gateway {
        None
    } else {
        Some(Box::new(CommandPinger::new()))
    };

    let tree = MetricsTree::new();
    let mut collector = match build_collector(
        fs,
        &args.proc_path,
        &args.dns_tests,
        pinger,
        &tree,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to register metrics: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Probers: {} ({} metrics registered)",
        collector.prober_names().join(", "),
        tree.metric_count()
    );
    if let Some(ref path) = args.dump {
        info!("Dumping metrics to {}", path.display());
    }

    let interval = Duration::from_secs(args.interval);

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let mut cycle_count: u64 = 0;

    info!("Starting probe loop");

    while running.load(Ordering::SeqCst) {
        let timing = collector.probe_all();
        cycle_count += 1;

        info!(
            "Cycle #{}: {} in {:?}, {} metrics",
            cycle_count,
            describe_cycle(timing),
            timing.total,
            tree.metric_count()
        );

        if let Some(ref path) = args.dump {
            match tree.write_json(path) {
                Ok(()) => debug!("Metrics written to {}", path.display()),
                Err(e) => error!("Failed to write metrics to {}: {}", path.display(), e),
            }
        }

        // Sleep with periodic checks for shutdown signal
        let sleep_interval = Duration::from_millis(100);
        let mut remaining = interval;
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(sleep_interval);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    info!("Shutdown complete after {} cycles", cycle_count);
}
