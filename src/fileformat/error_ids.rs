use std::path::Path;

use anyhow::Context;
use itertools::Itertools;

/// Failed sample ids, newline separated, no trailing newline. Written even when empty.
pub fn write_error_ids(path: &Path, ids: &[String]) -> anyhow::Result<()> {
    std::fs::write(path, ids.iter().join("\n"))
        .with_context(|| format!("Could not write error ids to {}", path.display()))
}
