//! Shared value cells handed to the registry.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared unsigned counter or gauge.
#[derive(Debug, Clone, Default)]
pub struct U64Cell(Arc<AtomicU64>);

impl U64Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, value: u64) {
        self.0.store(value, Ordering::Relaxed);
    }
}

/// Shared boolean flag.
#[derive(Debug, Clone, Default)]
pub struct BoolCell(Arc<AtomicBool>);

impl BoolCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Relaxed);
    }
}

/// Shared text value.
#[derive(Debug, Clone, Default)]
pub struct TextCell(Arc<Mutex<String>>);

impl TextCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, value: impl Into<String>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = value.into();
    }
}
