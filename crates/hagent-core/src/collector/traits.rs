//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait allows probers to work with both the real `/proc`
//! filesystem on Linux and mock implementations for testing on macOS or in CI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Abstraction for filesystem operations.
///
/// This trait allows probers to read from the real filesystem or from
/// a mock implementation for testing purposes.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    ///
    /// # Arguments
    /// * `path` - Path to the file to read
    ///
    /// # Returns
    /// The file contents as a string, or an I/O error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Opens a file for buffered, line-by-line reading.
    ///
    /// The file handle is released when the returned reader is dropped.
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send + '_>>;
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send + '_>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}
