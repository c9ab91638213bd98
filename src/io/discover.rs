use std::path::{Path, PathBuf};

use crate::io::config_io::CONFIG_FILE;
use crate::io::store::STORE_FILE;

/// Find the data directory by walking up from `start`, looking for an
/// existing store or config file. Falls back to `start` itself: an absent
/// store is the empty collection, and the first write creates it there.
pub fn discover_dir(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        if current.join(STORE_FILE).is_file() || current.join(CONFIG_FILE).is_file() {
            return current;
        }
        if !current.pop() {
            return start.to_path_buf();
        }
    }
}
