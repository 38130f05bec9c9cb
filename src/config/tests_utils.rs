//! Shared test utilities for the configuration module.

use std::sync::Mutex;

/// Serializes tests that mutate process environment variables.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());
