//! Network interface prober for `/proc/net/dev`.
//!
//! The set of rows in `/proc/net/dev` changes at runtime as interfaces come
//! and go, while the metrics namespace only grows. [`DeviceTable`] reconciles
//! the two: an interface is registered the first time it is seen and its
//! value cells are reused on every later cycle. Interfaces that disappear
//! stay registered with their last values and are marked as not probed.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::collector::procfs::parser::{NET_DEV_COLUMNS, parse_net_dev_line};
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Prober};
use crate::metrics::{Directory, MetricValue, RegistryError, U64Cell, Unit};

/// Name, unit and description of one `/proc/net/dev` column.
#[derive(Debug, Clone, Copy)]
pub struct NetDevField {
    pub name: &'static str,
    pub unit: Unit,
    pub description: &'static str,
}

const fn field(name: &'static str, unit: Unit, description: &'static str) -> NetDevField {
    NetDevField {
        name,
        unit,
        description,
    }
}

/// Metrics registered per interface, in `/proc/net/dev` column order.
pub const NET_DEV_FIELDS: [NetDevField; NET_DEV_COLUMNS] = [
    field("rx-data", Unit::Byte, "bytes received"),
    field("rx-packets", Unit::None, "total packets received"),
    field("rx-errors", Unit::None, "total receive errors"),
    field("rx-dropped", Unit::None, "receive packets dropped"),
    field("rx-overruns", Unit::None, "receive overrun errors"),
    field("rx-frame-errors", Unit::None, "receive framing errors"),
    field("rx-compressed-packets", Unit::None, "compressed packets received"),
    field("multicast-frames", Unit::None, "multicast frames received"),
    field("tx-data", Unit::Byte, "bytes transmitted"),
    field("tx-packets", Unit::None, "total packets transmitted"),
    field("tx-errors", Unit::None, "total transmit errors"),
    field("tx-dropped", Unit::None, "transmit packets dropped"),
    field("tx-overruns", Unit::None, "transmit overrun errors"),
    field("tx-collision-errors", Unit::None, "transmit collision errors"),
    field("tx-carrier-losses", Unit::None, "transmit carrier losses"),
    field("tx-compressed-packets", Unit::None, "compressed packets transmitted"),
];

/// Counters and registration handles of one interface.
pub struct CounterRecord {
    name: String,
    counters: [u64; NET_DEV_COLUMNS],
    probed: bool,
    directory: Box<dyn Directory>,
    cells: [U64Cell; NET_DEV_COLUMNS],
}

impl std::fmt::Debug for CounterRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterRecord")
            .field("name", &self.name)
            .field("counters", &self.counters)
            .field("probed", &self.probed)
            .field("directory", &self.directory.path())
            .finish_non_exhaustive()
    }
}

impl CounterRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last parsed counters, in column order.
    pub fn counters(&self) -> &[u64; NET_DEV_COLUMNS] {
        &self.counters
    }

    /// Whether the interface was seen in the current (or last completed) pass.
    pub fn probed(&self) -> bool {
        self.probed
    }

    /// Registry path of the interface's metrics directory.
    pub fn directory_path(&self) -> &str {
        self.directory.path()
    }

    fn store(&mut self, counters: [u64; NET_DEV_COLUMNS]) {
        self.counters = counters;
        for (cell, value) in self.cells.iter().zip(counters) {
            cell.set(value);
        }
    }
}

/// Registration of a new interface that has not completed yet.
///
/// Holds the directory and the cells registered so far so a later pass
/// resumes at the first metric that was rejected. Nothing already
/// registered is removed or registered twice.
struct PendingRegistration {
    directory: Box<dyn Directory>,
    cells: [U64Cell; NET_DEV_COLUMNS],
    registered: usize,
}

impl std::fmt::Debug for PendingRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRegistration")
            .field("directory", &self.directory.path())
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}

impl PendingRegistration {
    fn begin(parent: &dyn Directory, name: &str) -> Result<Self, RegistryError> {
        Ok(Self {
            directory: parent.register_directory(name)?,
            cells: std::array::from_fn(|_| U64Cell::new()),
            registered: 0,
        })
    }

    /// Registers the remaining counter cells. Stops at the first rejected
    /// call.
    fn resume(&mut self) -> Result<(), RegistryError> {
        while let Some(field) = NET_DEV_FIELDS.get(self.registered) {
            self.directory.register_metric(
                field.name,
                MetricValue::U64(self.cells[self.registered].clone()),
                field.unit,
                field.description,
            )?;
            self.registered += 1;
        }
        Ok(())
    }
}

/// Outcome of [`DeviceTable::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// First sighting; the interface was registered.
    Registered,
    /// Known interface; counters were overwritten.
    Updated,
}

/// Interfaces seen so far, keyed by name.
#[derive(Debug, Default)]
pub struct DeviceTable {
    records: HashMap<String, CounterRecord>,
    pending: HashMap<String, PendingRegistration>,
}

impl DeviceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every known interface as not probed. Called once before a pass.
    pub fn begin_cycle(&mut self) {
        for record in self.records.values_mut() {
            record.probed = false;
        }
    }

    /// Records one observation of `name`.
    ///
    /// Unknown names are registered under `parent` first. A registration
    /// failure is returned and nothing is added to the table, so the name
    /// is treated as new again on the next pass. If the directory was
    /// created, that pass continues with the metric that failed.
    pub fn apply(
        &mut self,
        parent: &dyn Directory,
        name: &str,
        counters: [u64; NET_DEV_COLUMNS],
    ) -> Result<Applied, RegistryError> {
        if let Some(record) = self.records.get_mut(name) {
            record.probed = true;
            record.store(counters);
            return Ok(Applied::Updated);
        }

        let mut pending = match self.pending.remove(name) {
            Some(pending) => pending,
            None => PendingRegistration::begin(parent, name)?,
        };
        if let Err(e) = pending.resume() {
            warn!(
                interface = %name,
                registered = pending.registered,
                error = %e,
                "interface registration incomplete, resuming next pass"
            );
            self.pending.insert(name.to_string(), pending);
            return Err(e);
        }

        let mut record = CounterRecord {
            name: name.to_string(),
            counters: [0; NET_DEV_COLUMNS],
            probed: true,
            directory: pending.directory,
            cells: pending.cells,
        };
        record.store(counters);
        info!(interface = %name, path = %record.directory_path(), "registered network interface");
        self.records.insert(name.to_string(), record);
        Ok(Applied::Registered)
    }

    /// Finishes a pass. Returns the number of interfaces not seen in it.
    ///
    /// Unprobed interfaces are kept: the registry has no way to remove
    /// their metrics.
    pub fn end_cycle(&self) -> usize {
        let stale = self.records.values().filter(|r| !r.probed).count();
        if stale > 0 {
            debug!(stale, "network interfaces missing from this pass");
        }
        stale
    }

    pub fn get(&self, name: &str) -> Option<&CounterRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names seen in the current pass, sorted.
    pub fn probed_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .records
            .values()
            .filter(|r| r.probed)
            .map(|r| r.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

/// Where a [`NetIfProber`] is in its current or last pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Idle,
    Scanning,
    Done,
    Failed,
}

/// Samples `/proc/net/dev` and publishes per-interface counters.
pub struct NetIfProber<F: FileSystem> {
    fs: F,
    path: PathBuf,
    directory: Box<dyn Directory>,
    table: DeviceTable,
    state: ProbeState,
}

impl<F: FileSystem> NetIfProber<F> {
    /// Creates a new network interface prober.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    /// * `directory` - Registry directory that receives one subdirectory per interface
    pub fn new(fs: F, proc_path: impl Into<String>, directory: Box<dyn Directory>) -> Self {
        Self {
            fs,
            path: PathBuf::from(format!("{}/net/dev", proc_path.into())),
            directory,
            table: DeviceTable::new(),
            state: ProbeState::Idle,
        }
    }

    pub fn table(&self) -> &DeviceTable {
        &self.table
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// Mutable access to the filesystem, used by tests to change `/proc`
    /// between passes.
    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    fn scan(&mut self) -> Result<(), CollectError> {
        let reader = self.fs.open(&self.path)?;
        self.table.begin_cycle();

        for line in reader.lines() {
            let line = line?;
            if let Some(record) = parse_net_dev_line(&line)? {
                self.table
                    .apply(self.directory.as_ref(), &record.interface, record.counters)?;
            }
        }

        self.table.end_cycle();
        Ok(())
    }
}

impl<F: FileSystem> Prober for NetIfProber<F> {
    fn name(&self) -> &str {
        "netif"
    }

    fn probe(&mut self) -> Result<(), CollectError> {
        self.state = ProbeState::Scanning;
        let result = self.scan();
        self.state = if result.is_ok() {
            ProbeState::Done
        } else {
            ProbeState::Failed
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::procfs::parser::ParseError;
    use crate::metrics::{MetricsTree, Value};
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    /// Registry double that records every call and can reject chosen names.
    #[derive(Clone, Default)]
    struct Recorder {
        state: Arc<Mutex<RecorderState>>,
    }

    #[derive(Default)]
    struct RecorderState {
        directories: Vec<String>,
        metrics: Vec<String>,
        reject: HashSet<String>,
    }

    impl Recorder {
        fn root(&self) -> Box<dyn Directory> {
            Box::new(RecordingDir {
                recorder: self.clone(),
                path: String::new(),
            })
        }

        fn reject(&self, name: &str) {
            self.state.lock().unwrap().reject.insert(name.to_string());
        }

        fn accept_all(&self) {
            self.state.lock().unwrap().reject.clear();
        }

        fn directory_calls(&self, path: &str) -> usize {
            let state = self.state.lock().unwrap();
            state.directories.iter().filter(|d| *d == path).count()
        }

        fn metric_calls(&self, prefix: &str) -> usize {
            let state = self.state.lock().unwrap();
            state.metrics.iter().filter(|m| m.starts_with(prefix)).count()
        }
    }

    struct RecordingDir {
        recorder: Recorder,
        path: String,
    }

    impl Directory for RecordingDir {
        fn path(&self) -> &str {
            &self.path
        }

        fn register_directory(&self, name: &str) -> Result<Box<dyn Directory>, RegistryError> {
            let path = format!("{}/{}", self.path, name);
            let mut state = self.recorder.state.lock().unwrap();
            state.directories.push(path.clone());
            if state.reject.contains(name) {
                return Err(RegistryError::InvalidName(name.to_string()));
            }
            Ok(Box::new(RecordingDir {
                recorder: self.recorder.clone(),
                path,
            }))
        }

        fn register_metric(
            &self,
            name: &str,
            _value: MetricValue,
            _unit: Unit,
            _description: &str,
        ) -> Result<(), RegistryError> {
            let path = format!("{}/{}", self.path, name);
            let mut state = self.recorder.state.lock().unwrap();
            state.metrics.push(path.clone());
            if state.reject.contains(name) {
                return Err(RegistryError::DuplicateMetric(path));
            }
            Ok(())
        }
    }

    fn counters(seed: u64) -> [u64; NET_DEV_COLUMNS] {
        std::array::from_fn(|i| seed + i as u64)
    }

    fn tree_prober(fs: MockFs) -> (MetricsTree, NetIfProber<MockFs>) {
        let tree = MetricsTree::new();
        let dir = tree.root().register_directory("netif").unwrap();
        (tree, NetIfProber::new(fs, "/proc", dir))
    }

    fn recorded_prober(fs: MockFs) -> (Recorder, NetIfProber<MockFs>) {
        let recorder = Recorder::default();
        let root = recorder.root();
        (recorder, NetIfProber::new(fs, "/proc", root))
    }

    #[test]
    fn test_end_to_end_lo_and_eth0() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|Receive...
 face |bytes packets errs drop fifo frame compressed multicast|bytes packets errs drop fifo colls carrier compressed
    lo: 100 1 0 0 0 0 0 0 100 1 0 0 0 0 0 0
  eth0: 5000 40 0 0 0 0 0 0 3000 30 0 0 0 0 0 0
",
        );
        let (tree, mut prober) = tree_prober(fs);
        assert_eq!(prober.state(), ProbeState::Idle);

        prober.probe().unwrap();

        assert_eq!(prober.state(), ProbeState::Done);
        let table = prober.table();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("lo").unwrap().counters(),
            &[100, 1, 0, 0, 0, 0, 0, 0, 100, 1, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            table.get("eth0").unwrap().counters(),
            &[5000, 40, 0, 0, 0, 0, 0, 0, 3000, 30, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(table.probed_names(), vec!["eth0", "lo"]);

        assert_eq!(tree.metric_count(), 2 * NET_DEV_COLUMNS);
        assert_eq!(tree.get("/netif/eth0/rx-data"), Some(Value::U64(5000)));
        assert_eq!(tree.get("/netif/eth0/tx-packets"), Some(Value::U64(30)));
        assert_eq!(tree.get("/netif/lo/tx-data"), Some(Value::U64(100)));
        assert_eq!(table.get("lo").unwrap().directory_path(), "/netif/lo");
    }

    #[test]
    fn test_every_column_has_its_own_metric() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("eth0", counters(100))]);
        let (tree, mut prober) = tree_prober(fs);
        prober.probe().unwrap();

        for (i, field) in NET_DEV_FIELDS.iter().enumerate() {
            let path = format!("/netif/eth0/{}", field.name);
            assert_eq!(tree.get(&path), Some(Value::U64(100 + i as u64)), "{}", path);
        }
        let rx = tree.get("/netif/eth0/rx-errors");
        let tx = tree.get("/netif/eth0/tx-errors");
        assert_ne!(rx, tx);
    }

    #[test]
    fn test_registration_happens_once() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("lo", counters(0)), ("eth0", counters(10))]);
        let (recorder, mut prober) = recorded_prober(fs);

        for pass in 0..5u64 {
            prober
                .fs_mut()
                .set_net_dev(&[("lo", counters(pass)), ("eth0", counters(10 + pass))]);
            prober.probe().unwrap();
        }

        assert_eq!(recorder.directory_calls("/lo"), 1);
        assert_eq!(recorder.directory_calls("/eth0"), 1);
        assert_eq!(recorder.metric_calls("/lo/"), NET_DEV_COLUMNS);
        assert_eq!(recorder.metric_calls("/eth0/"), NET_DEV_COLUMNS);
        assert_eq!(prober.table().get("eth0").unwrap().counters(), &counters(14));
    }

    #[test]
    fn test_new_interface_registered_in_pass_it_appears() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("lo", counters(1))]);
        let (tree, mut prober) = tree_prober(fs);
        prober.probe().unwrap();
        assert!(prober.table().get("docker0").is_none());

        prober
            .fs_mut()
            .set_net_dev(&[("lo", counters(2)), ("docker0", counters(700))]);
        prober.probe().unwrap();

        let record = prober.table().get("docker0").unwrap();
        assert!(record.probed());
        assert_eq!(record.counters(), &counters(700));
        assert_eq!(tree.get("/netif/docker0/rx-data"), Some(Value::U64(700)));
    }

    #[test]
    fn test_liveness_tracks_last_pass() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("lo", counters(1)), ("eth0", counters(2))]);
        let (tree, mut prober) = tree_prober(fs);
        prober.probe().unwrap();

        prober.fs_mut().set_net_dev(&[("lo", counters(3))]);
        prober.probe().unwrap();

        let table = prober.table();
        assert!(table.get("lo").unwrap().probed());
        assert!(!table.get("eth0").unwrap().probed());
        assert_eq!(table.probed_names(), vec!["lo"]);
        assert_eq!(table.end_cycle(), 1);

        // Vanished interfaces keep their last values.
        assert_eq!(table.get("eth0").unwrap().counters(), &counters(2));
        assert_eq!(tree.get("/netif/eth0/rx-data"), Some(Value::U64(2)));
    }

    #[test]
    fn test_begin_cycle_clears_probed() {
        let tree = MetricsTree::new();
        let root = tree.root();
        let mut table = DeviceTable::new();
        table.apply(&root, "lo", counters(0)).unwrap();
        table.apply(&root, "eth0", counters(0)).unwrap();

        table.begin_cycle();

        assert!(table.probed_names().is_empty());
        assert_eq!(table.end_cycle(), 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_apply_reports_outcome() {
        let tree = MetricsTree::new();
        let root = tree.root();
        let mut table = DeviceTable::new();
        assert!(table.is_empty());
        assert_eq!(
            table.apply(&root, "eth0", counters(1)).unwrap(),
            Applied::Registered
        );
        assert_eq!(
            table.apply(&root, "eth0", counters(2)).unwrap(),
            Applied::Updated
        );
        assert_eq!(tree.get("/eth0/rx-data"), Some(Value::U64(2)));
    }

    #[test]
    fn test_short_record_fails_pass() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|Receive
    lo: 100 1 0 0 0 0 0 0 100 1 0 0 0 0 0 0
  eth1: 1 2 3
  eth2: 5000 40 0 0 0 0 0 0 3000 30 0 0 0 0 0 0
",
        );
        let (tree, mut prober) = tree_prober(fs);

        let err = prober.probe().unwrap_err();

        match err {
            CollectError::Parse(ParseError::ShortRecord { line, parsed }) => {
                assert_eq!(line, "  eth1: 1 2 3");
                assert_eq!(parsed, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(prober.state(), ProbeState::Failed);
        assert!(prober.table().get("lo").is_some());
        assert!(prober.table().get("eth1").is_none());
        assert!(prober.table().get("eth2").is_none());
        assert!(!tree.has_directory("/netif/eth2"));
    }

    #[test]
    fn test_failed_pass_keeps_previous_values() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("eth0", counters(10))]);
        let (tree, mut prober) = tree_prober(fs);
        prober.probe().unwrap();

        prober
            .fs_mut()
            .add_file("/proc/net/dev", "  eth0: 99 99\n");
        assert!(prober.probe().is_err());

        assert_eq!(tree.get("/netif/eth0/rx-data"), Some(Value::U64(10)));
        assert_eq!(prober.table().get("eth0").unwrap().counters(), &counters(10));
    }

    #[test]
    fn test_registration_failure_is_retried() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("lo", counters(1)), ("eth0", counters(2))]);
        let (recorder, mut prober) = recorded_prober(fs);
        recorder.reject("eth0");

        let err = prober.probe().unwrap_err();
        assert!(matches!(err, CollectError::Registry(_)));
        assert_eq!(prober.state(), ProbeState::Failed);
        assert!(prober.table().get("lo").is_some());
        assert!(prober.table().get("eth0").is_none());

        recorder.accept_all();
        prober.probe().unwrap();

        assert_eq!(prober.table().get("eth0").unwrap().counters(), &counters(2));
        assert_eq!(recorder.directory_calls("/eth0"), 2);
        assert_eq!(recorder.directory_calls("/lo"), 1);
    }

    #[test]
    fn test_metric_registration_failure_aborts_without_cleanup() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("eth0", counters(2))]);
        let (recorder, mut prober) = recorded_prober(fs);
        recorder.reject("tx-data");

        let err = prober.probe().unwrap_err();

        assert!(matches!(
            err,
            CollectError::Registry(RegistryError::DuplicateMetric(ref p)) if p == "/eth0/tx-data"
        ));
        assert!(prober.table().is_empty());
        // The eight receive columns stay registered; nothing is rolled back.
        assert_eq!(recorder.metric_calls("/eth0/"), 9);
    }

    #[test]
    fn test_metric_registration_resumes_next_pass() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("eth0", counters(2))]);
        let (recorder, mut prober) = recorded_prober(fs);
        recorder.reject("tx-data");
        assert!(prober.probe().is_err());

        recorder.accept_all();
        prober.probe().unwrap();

        assert_eq!(prober.table().get("eth0").unwrap().counters(), &counters(2));
        assert_eq!(recorder.directory_calls("/eth0"), 1);
        // tx-data is tried twice, every other column once.
        assert_eq!(recorder.metric_calls("/eth0/"), NET_DEV_COLUMNS + 1);
        assert_eq!(recorder.metric_calls("/eth0/rx-data"), 1);
    }

    #[test]
    fn test_conflicting_metric_keeps_failing_at_same_name() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("lo", counters(1)), ("eth0", counters(2))]);
        let (tree, mut prober) = tree_prober(fs);
        tree.root()
            .register_directory("netif")
            .unwrap()
            .register_directory("eth0")
            .unwrap()
            .register_metric("tx-data", MetricValue::U64(U64Cell::new()), Unit::Byte, "")
            .unwrap();

        for _ in 0..3 {
            let err = prober.probe().unwrap_err();
            assert_eq!(
                err.to_string(),
                "registration error: metric /netif/eth0/tx-data already registered"
            );
        }

        // Interfaces before the conflict keep updating.
        prober
            .fs_mut()
            .set_net_dev(&[("lo", counters(5)), ("eth0", counters(2))]);
        assert!(prober.probe().is_err());
        assert_eq!(tree.get("/netif/lo/rx-data"), Some(Value::U64(5)));
        assert_eq!(tree.get("/netif/eth0/rx-data"), Some(Value::U64(0)));
        assert!(prober.table().get("eth0").is_none());
    }

    #[test]
    fn test_missing_source_fails_pass() {
        let mut fs = MockFs::new();
        fs.set_net_dev(&[("lo", counters(1))]);
        let (_tree, mut prober) = tree_prober(fs);
        prober.probe().unwrap();

        prober.fs_mut().remove_file("/proc/net/dev");
        let err = prober.probe().unwrap_err();

        assert!(matches!(err, CollectError::Io(_)));
        assert_eq!(prober.state(), ProbeState::Failed);
        // Nothing was scanned, so liveness is left as the last pass set it.
        assert!(prober.table().get("lo").unwrap().probed());
    }

    #[test]
    fn test_read_failure_mid_scan() {
        let mut fs = MockFs::new();
        fs.add_broken_file(
            "/proc/net/dev",
            "    lo: 100 1 0 0 0 0 0 0 100 1 0 0 0 0 0 0\n",
        );
        let (_tree, mut prober) = tree_prober(fs);

        let err = prober.probe().unwrap_err();

        assert!(matches!(err, CollectError::Io(_)));
        assert_eq!(prober.state(), ProbeState::Failed);
        assert!(prober.table().get("lo").is_some());
    }

    #[test]
    fn test_typical_system_scenario() {
        let (tree, mut prober) = tree_prober(MockFs::typical_system());
        prober.probe().unwrap();

        assert_eq!(prober.table().probed_names(), vec!["eth0", "lo"]);
        assert_eq!(tree.get("/netif/eth0/tx-errors"), Some(Value::U64(2)));
        assert_eq!(tree.get("/netif/eth0/rx-errors"), Some(Value::U64(5)));
        assert_eq!(
            tree.get("/netif/eth0/tx-compressed-packets"),
            Some(Value::U64(8))
        );
    }
}
