//! Default gateway prober.
//!
//! Finds the default route in `/proc/net/route`, pings the gateway once per
//! cycle and reports whether it is reachable. A gateway counts as reachable
//! when it answers the ping or the kernel holds a resolved neighbour entry
//! for it in `/proc/net/arp`.

use std::io;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::debug;

use crate::collector::procfs::parser::{parse_net_arp, parse_net_route};
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Prober};
use crate::metrics::{
    BoolCell, Directory, Distribution, MetricValue, RegistryError, TextCell, Unit,
};

/// Sends a single echo request.
pub trait Pinger: Send {
    /// Returns the reported round-trip time in milliseconds, or `None` if
    /// no reply arrived. `Err` means the ping could not be attempted.
    fn ping(&self, addr: Ipv4Addr) -> io::Result<Option<f64>>;
}

/// Pings by running the system `ping` utility with a one second deadline.
#[derive(Debug, Clone)]
pub struct CommandPinger {
    program: String,
}

impl Default for CommandPinger {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPinger {
    pub fn new() -> Self {
        Self::with_program("ping")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Pinger for CommandPinger {
    fn ping(&self, addr: Ipv4Addr) -> io::Result<Option<f64>> {
        let output = Command::new(&self.program)
            .args(["-n", "-c", "1", "-W", "1"])
            .arg(addr.to_string())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Ok(None);
        }
        Ok(parse_ping_rtt(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Extracts the `time=<ms>` value from `ping` output.
fn parse_ping_rtt(output: &str) -> Option<f64> {
    output
        .split_whitespace()
        .find_map(|token| token.strip_prefix("time="))
        .and_then(|ms| ms.trim_end_matches("ms").parse().ok())
}

pub struct GatewayProber<F: FileSystem> {
    fs: F,
    route_path: PathBuf,
    arp_path: PathBuf,
    pinger: Box<dyn Pinger>,
    address: TextCell,
    interface: TextCell,
    reachable: BoolCell,
    ping_time: Distribution,
    rtt: Distribution,
}

impl<F: FileSystem> GatewayProber<F> {
    /// Registers the gateway metrics in `directory`, pinging with the
    /// system `ping` utility.
    pub fn register(
        fs: F,
        proc_path: impl Into<String>,
        directory: &dyn Directory,
    ) -> Result<Self, RegistryError> {
        Self::with_pinger(fs, proc_path, directory, Box::new(CommandPinger::new()))
    }

    pub fn with_pinger(
        fs: F,
        proc_path: impl Into<String>,
        directory: &dyn Directory,
        pinger: Box<dyn Pinger>,
    ) -> Result<Self, RegistryError> {
        let proc_path = proc_path.into();
        let prober = Self {
            fs,
            route_path: PathBuf::from(format!("{}/net/route", proc_path)),
            arp_path: PathBuf::from(format!("{}/net/arp", proc_path)),
            pinger,
            address: TextCell::new(),
            interface: TextCell::new(),
            reachable: BoolCell::new(),
            ping_time: Distribution::latency_ms(),
            rtt: Distribution::latency_ms(),
        };
        directory.register_metric(
            "gateway-address",
            MetricValue::Text(prober.address.clone()),
            Unit::None,
            "address of default gateway",
        )?;
        directory.register_metric(
            "gateway-interface",
            MetricValue::Text(prober.interface.clone()),
            Unit::None,
            "interface the default gateway is reached through",
        )?;
        directory.register_metric(
            "gateway-reachable",
            MetricValue::Bool(prober.reachable.clone()),
            Unit::None,
            "true if the gateway answered a ping or has a resolved neighbour entry",
        )?;
        directory.register_metric(
            "gateway-ping-time",
            MetricValue::Distribution(prober.ping_time.clone()),
            Unit::Millisecond,
            "wall time of successful gateway pings",
        )?;
        directory.register_metric(
            "gateway-rtt",
            MetricValue::Distribution(prober.rtt.clone()),
            Unit::Millisecond,
            "round-trip time reported by successful gateway pings",
        )?;
        Ok(prober)
    }
}

impl<F: FileSystem> Prober for GatewayProber<F> {
    fn name(&self) -> &str {
        "gateway"
    }

    fn probe(&mut self) -> Result<(), CollectError> {
        let routes = parse_net_route(&self.fs.read_to_string(&self.route_path)?)?;
        let Some(route) = routes.into_iter().find(|r| r.is_default()) else {
            debug!("no default route");
            self.address.set("");
            self.interface.set("");
            self.reachable.set(false);
            return Ok(());
        };

        let neighbours = parse_net_arp(&self.fs.read_to_string(&self.arp_path)?)?;
        let resolved = neighbours.iter().any(|n| {
            n.address == route.gateway && n.device == route.interface && n.is_complete()
        });

        self.address.set(route.gateway.to_string());
        self.interface.set(route.interface);

        let start = Instant::now();
        let reply = match self.pinger.ping(route.gateway) {
            Ok(reply) => reply,
            Err(e) => {
                self.reachable.set(resolved);
                return Err(e.into());
            }
        };
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match reply {
            Some(rtt_ms) => {
                debug!(gateway = %route.gateway, rtt_ms, elapsed_ms, "gateway ping ok");
                self.ping_time.add(elapsed_ms);
                self.rtt.add(rtt_ms);
            }
            None => debug!(gateway = %route.gateway, "no reply from gateway"),
        }
        self.reachable.set(resolved || reply.is_some());
        Ok(())
    }
}
