//! In-memory mock filesystem for testing probers without real `/proc`.
//!
//! This module provides `MockFs` which simulates a filesystem in memory,
//! allowing tests to run on macOS and in CI environments without Linux.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores files in memory, allowing tests to simulate
/// various `/proc` filesystem states without needing actual Linux access.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Files whose reader fails after yielding their content.
    broken: HashSet<PathBuf>,
}

/// Reader that always fails; chained after a file's content to simulate
/// an I/O error mid-scan.
struct BrokenTail;

impl Read for BrokenTail {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("simulated read failure"))
    }
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content, replacing any previous content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.broken.remove(&path);
        self.files.insert(path, content.into());
    }

    /// Adds a file whose reader returns `content` and then fails with an
    /// I/O error instead of reaching end of file.
    pub fn add_broken_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_file(&path, content);
        self.broken.insert(path);
    }

    /// Removes a file.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.files.remove(path);
        self.broken.remove(path);
    }

    /// Writes `/proc/net/dev` with the standard two header lines followed by
    /// one row per interface.
    pub fn set_net_dev(&mut self, interfaces: &[(&str, [u64; 16])]) {
        let mut content = String::from(
            "Inter-|   Receive                                                |  Transmit\n \
             face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n",
        );
        for (name, counters) in interfaces {
            let values: Vec<String> = counters.iter().map(|v| v.to_string()).collect();
            content.push_str(&format!("{:>6}: {}\n", name, values.join(" ")));
        }
        self.add_file("/proc/net/dev", content);
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if self.broken.contains(path) {
            return Err(io::Error::other("simulated read failure"));
        }
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send + '_>> {
        let content = self.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })?;
        let cursor = Cursor::new(content.clone().into_bytes());
        if self.broken.contains(path) {
            Ok(Box::new(BufReader::new(cursor.chain(BrokenTail))))
        } else {
            Ok(Box::new(cursor))
        }
    }
}
