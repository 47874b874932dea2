use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;

use crate::runtime::Error;

/// Read sample ids, one per line, keeping file order. Blank lines are skipped.
pub fn read_sample_ids(path: &Path) -> anyhow::Result<Vec<String>> {
    if !path.is_file() {
        return Err(Error::file_not_found(path).into());
    }
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    parse_sample_ids(BufReader::new(file))
        .with_context(|| format!("Could not read sample ids from {}", path.display()))
}

pub fn parse_sample_ids<R: BufRead>(reader: R) -> anyhow::Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_drops_blanks() {
        let text = "SRR3\nSRR1\r\n\n  SRR2  \n";
        let ids = parse_sample_ids(text.as_bytes()).unwrap();
        assert_eq!(ids, vec!["SRR3", "SRR1", "SRR2"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_sample_ids(&dir.path().join("ids.txt")).is_err());
    }
}
