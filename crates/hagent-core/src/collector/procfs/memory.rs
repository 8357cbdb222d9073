//! Memory prober for `/proc/meminfo`.

use std::path::PathBuf;

use crate::collector::procfs::parser::{ParseError, parse_meminfo};
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Prober};
use crate::metrics::{Directory, MetricValue, RegistryError, U64Cell, Unit};

/// Publishes total, free and available memory in bytes.
pub struct MemoryProber<F: FileSystem> {
    fs: F,
    path: PathBuf,
    total: U64Cell,
    free: U64Cell,
    available: U64Cell,
}

impl<F: FileSystem> MemoryProber<F> {
    /// Registers the memory metrics in `directory`.
    pub fn register(
        fs: F,
        proc_path: impl Into<String>,
        directory: &dyn Directory,
    ) -> Result<Self, RegistryError> {
        let prober = Self {
            fs,
            path: PathBuf::from(format!("{}/meminfo", proc_path.into())),
            total: U64Cell::new(),
            free: U64Cell::new(),
            available: U64Cell::new(),
        };
        directory.register_metric(
            "available",
            MetricValue::U64(prober.available.clone()),
            Unit::Byte,
            "estimate of available memory",
        )?;
        directory.register_metric(
            "free",
            MetricValue::U64(prober.free.clone()),
            Unit::Byte,
            "free memory",
        )?;
        directory.register_metric(
            "total",
            MetricValue::U64(prober.total.clone()),
            Unit::Byte,
            "total memory",
        )?;
        Ok(prober)
    }
}

impl<F: FileSystem> Prober for MemoryProber<F> {
    fn name(&self) -> &str {
        "memory"
    }

    fn probe(&mut self) -> Result<(), CollectError> {
        let content = self.fs.read_to_string(&self.path)?;
        let info = parse_meminfo(&content)?;

        let total = kb_to_bytes("MemTotal", info.mem_total)?;
        let free = kb_to_bytes("MemFree", info.mem_free)?;
        let available = kb_to_bytes("MemAvailable", info.mem_available)?;

        self.total.set(total);
        self.free.set(free);
        self.available.set(available);
        Ok(())
    }
}

fn kb_to_bytes(field: &str, kb: u64) -> Result<u64, ParseError> {
    kb.checked_mul(1024)
        .ok_or_else(|| ParseError::new(format!("{} value {} kB overflows bytes", field, kb)))
}
