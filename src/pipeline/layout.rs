use std::fmt;
use std::path::Path;

use log::error;

use crate::pipeline::constants::RAW_READ_SUFFIX;
use crate::pipeline::workdir::{entry_name, is_file, is_sample_file, list_entries};

///////////////////////////////
/// Read layout of one sample, derived from the raw read files present
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Single,
    Paired,
    Invalid,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Layout::Single => "SINGLE",
            Layout::Paired => "PAIRED",
            Layout::Invalid => "INVALID",
        };
        write!(f, "{}", s)
    }
}

/// Names of the raw read files belonging to a sample
pub fn raw_read_files(dir: &Path, sample_id: &str) -> Result<Vec<String>, walkdir::Error> {
    let files = list_entries(dir)?
        .iter()
        .filter(|e| is_file(e))
        .filter_map(entry_name)
        .filter(|name| is_sample_file(name, sample_id) && name.ends_with(RAW_READ_SUFFIX))
        .map(|name| name.to_string())
        .collect();
    Ok(files)
}

/// Classify a sample by the number of raw read files: one is single-end, two is
/// paired-end, anything else is invalid. Does not touch the files.
pub fn detect_layout(dir: &Path, sample_id: &str) -> Layout {
    let files = match raw_read_files(dir, sample_id) {
        Ok(files) => files,
        Err(e) => {
            error!("Could not list {} while checking {}: {}", dir.display(), sample_id, e);
            return Layout::Invalid;
        }
    };

    match files.len() {
        0 => Layout::Invalid,
        1 => Layout::Single,
        2 => Layout::Paired,
        n => {
            error!(
                "{} has {} read files ({}), invalid format! skip this {} ...",
                sample_id,
                n,
                files.join(", "),
                sample_id
            );
            Layout::Invalid
        }
    }
}
