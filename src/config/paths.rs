//! Path expansion utilities for tilde (`~`) substitution.

use std::path::{Path, PathBuf};

/// Expand `~` to home directory in a PathBuf (in-place).
pub fn expand_tilde(path: &mut PathBuf) {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            let rest = path.strip_prefix("~").unwrap_or(Path::new(""));
            *path = home.join(rest);
        }
    }
}
