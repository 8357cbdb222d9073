//! In-process metrics tree implementing [`Directory`].

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::{Directory, MetricValue, RegistryError, Unit, Value, validate_name};

#[derive(Debug)]
enum Entry {
    Directory,
    Metric {
        value: MetricValue,
        unit: Unit,
        description: String,
    },
}

type Entries = Arc<RwLock<BTreeMap<String, Entry>>>;

/// Thread-safe hierarchical registry. Clones share the same tree.
#[derive(Debug, Clone)]
pub struct MetricsTree {
    entries: Entries,
}

/// Handle to one directory of a [`MetricsTree`].
#[derive(Debug, Clone)]
pub struct TreeDirectory {
    entries: Entries,
    path: String,
}

/// One metric as read by [`MetricsTree::snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    pub path: String,
    pub unit: Unit,
    pub description: String,
    pub value: Value,
}

/// Timestamped copy of the whole tree, as written by the daemon's dump.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSnapshot {
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub metrics: Vec<MetricSample>,
}

impl Default for MetricsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsTree {
    pub fn new() -> Self {
        let mut map = BTreeMap::new();
        map.insert("/".to_string(), Entry::Directory);
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns the root directory.
    pub fn root(&self) -> TreeDirectory {
        TreeDirectory {
            entries: Arc::clone(&self.entries),
            path: "/".to_string(),
        }
    }

    /// Reads every registered metric, sorted by path.
    pub fn snapshot(&self) -> Vec<MetricSample> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .filter_map(|(path, entry)| match entry {
                Entry::Directory => None,
                Entry::Metric {
                    value,
                    unit,
                    description,
                } => Some(MetricSample {
                    path: path.clone(),
                    unit: *unit,
                    description: description.clone(),
                    value: value.read(),
                }),
            })
            .collect()
    }

    /// Reads a single metric by absolute path.
    pub fn get(&self, path: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(path) {
            Some(Entry::Metric { value, .. }) => Some(value.read()),
            _ => None,
        }
    }

    /// Returns whether a directory exists at `path`.
    pub fn has_directory(&self, path: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        matches!(entries.get(path), Some(Entry::Directory))
    }

    /// Number of registered metrics.
    pub fn metric_count(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .values()
            .filter(|e| matches!(e, Entry::Metric { .. }))
            .count()
    }

    pub fn timestamped_snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            metrics: self.snapshot(),
        }
    }

    /// Writes a JSON snapshot of the tree to `path`.
    ///
    /// The file is written atomically via a `.tmp` intermediate file.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let snapshot = self.timestamped_snapshot();
        let json = serde_json::to_vec_pretty(&snapshot).map_err(io::Error::other)?;

        let tmp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        drop(file);

        fs::rename(tmp_path, path)
    }
}

impl TreeDirectory {
    fn child_path(&self, name: &str) -> String {
        if self.path == "/" {
            format!("/{}", name)
        } else {
            format!("{}/{}", self.path, name)
        }
    }
}

impl Directory for TreeDirectory {
    fn path(&self) -> &str {
        &self.path
    }

    fn register_directory(&self, name: &str) -> Result<Box<dyn Directory>, RegistryError> {
        validate_name(name)?;
        let path = self.child_path(name);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.get(&path) {
            Some(Entry::Metric { .. }) => return Err(RegistryError::NotADirectory(path)),
            Some(Entry::Directory) => {}
            None => {
                entries.insert(path.clone(), Entry::Directory);
            }
        }
        Ok(Box::new(TreeDirectory {
            entries: Arc::clone(&self.entries),
            path,
        }))
    }

    fn register_metric(
        &self,
        name: &str,
        value: MetricValue,
        unit: Unit,
        description: &str,
    ) -> Result<(), RegistryError> {
        validate_name(name)?;
        let path = self.child_path(name);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(&path) {
            return Err(RegistryError::DuplicateMetric(path));
        }
        entries.insert(
            path,
            Entry::Metric {
                value,
                unit,
                description: description.to_string(),
            },
        );
        Ok(())
    }
}
