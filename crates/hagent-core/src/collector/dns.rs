//! DNS lookup prober.
//!
//! Each configured test resolves one hostname per cycle and publishes whether
//! the lookup succeeded together with a distribution of lookup latencies.

use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use std::time::Instant;

use tracing::debug;

use crate::collector::{CollectError, Prober};
use crate::metrics::{BoolCell, Directory, Distribution, MetricValue, RegistryError, Unit};

/// Hostname resolution backend.
pub trait Resolver: Send {
    fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

/// Resolver that uses the system's `getaddrinfo` via `std::net`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        Ok((host, 0).to_socket_addrs()?.map(|addr| addr.ip()).collect())
    }
}

/// Publishes `healthy` and `latency` for one named lookup test.
pub struct DnsProber {
    test_name: String,
    hostname: String,
    resolver: Box<dyn Resolver>,
    healthy: BoolCell,
    latency: Distribution,
}

impl DnsProber {
    /// Registers a test using the system resolver.
    ///
    /// Metrics are placed in a subdirectory of `directory` named after the test.
    pub fn register(
        test_name: &str,
        hostname: &str,
        directory: &dyn Directory,
    ) -> Result<Self, RegistryError> {
        Self::with_resolver(test_name, hostname, directory, Box::new(SystemResolver))
    }

    pub fn with_resolver(
        test_name: &str,
        hostname: &str,
        directory: &dyn Directory,
        resolver: Box<dyn Resolver>,
    ) -> Result<Self, RegistryError> {
        let test_dir = directory.register_directory(test_name)?;
        let prober = Self {
            test_name: test_name.to_string(),
            hostname: hostname.to_string(),
            resolver,
            healthy: BoolCell::new(),
            latency: Distribution::latency_ms(),
        };
        test_dir.register_metric(
            "healthy",
            MetricValue::Bool(prober.healthy.clone()),
            Unit::None,
            "true if the last lookup succeeded",
        )?;
        test_dir.register_metric(
            "latency",
            MetricValue::Distribution(prober.latency.clone()),
            Unit::Millisecond,
            "lookup latency",
        )?;
        Ok(prober)
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }
}

impl Prober for DnsProber {
    fn name(&self) -> &str {
        &self.test_name
    }

    fn probe(&mut self) -> Result<(), CollectError> {
        let start = Instant::now();
        let result = self.resolver.resolve(&self.hostname);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let reason = match result {
            Ok(addrs) if !addrs.is_empty() => {
                debug!(host = %self.hostname, addrs = addrs.len(), elapsed_ms, "lookup ok");
                self.latency.add(elapsed_ms);
                self.healthy.set(true);
                return Ok(());
            }
            Ok(_) => "no addresses returned".to_string(),
            Err(e) => e.to_string(),
        };

        self.healthy.set(false);
        Err(CollectError::Resolve {
            host: self.hostname.clone(),
            reason,
        })
    }
}
