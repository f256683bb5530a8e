use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use log::debug;
use once_cell::sync::Lazy;

// Files that can't be read are cached as None so they are only tried once.
static SOURCES: Lazy<DashMap<PathBuf, Option<Arc<Vec<String>>>>> = Lazy::new(|| {
    DashMap::new()
});

/// Returns the trimmed source line `lineno` (1-based) of `filename`, if it can be read.
pub fn code_context(filename: &Path, lineno: u32) -> Option<String> {
    let index = (lineno as usize).checked_sub(1)?;
    let lines = lines(filename)?;
    let line = lines.get(index)?.trim();
    if line.is_empty() {
        None
    }
    else {
        Some(line.to_string())
    }
}

fn lines(filename: &Path) -> Option<Arc<Vec<String>>> {
    if let Some(lines) = SOURCES.get(filename) {
        return lines.clone();
    }

    let lines = match fs::read_to_string(filename) {
        Ok(source) => Some(Arc::new(source.lines().map(ToString::to_string).collect())),
        Err(error) => {
            debug!("No code context for {}: {}", filename.display(), error);
            None
        },
    };
    SOURCES.insert(filename.to_path_buf(), lines.clone());
    lines
}
