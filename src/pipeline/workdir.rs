use std::path::Path;

use walkdir::{DirEntry, WalkDir};

/// Direct children of `dir`, sorted by name. Nested directories are not entered.
pub fn list_entries(dir: &Path) -> Result<Vec<DirEntry>, walkdir::Error> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect()
}

/// File name as a string; None for names that are not UTF-8
pub fn entry_name(entry: &DirEntry) -> Option<&str> {
    entry.file_name().to_str()
}

/// Regular file, or a symlink resolving to one. Dangling links are neither.
pub fn is_file(entry: &DirEntry) -> bool {
    entry.path().is_file()
}

/// Directory, or a symlink resolving to one
pub fn is_dir(entry: &DirEntry) -> bool {
    entry.path().is_dir()
}

/// Whether `name` belongs to `sample_id`: the id must be followed by `_` or `.`,
/// so SRR1 does not claim SRR10_1.fastq.
pub fn is_sample_file(name: &str, sample_id: &str) -> bool {
    match name.strip_prefix(sample_id) {
        Some(rest) => rest.starts_with('_') || rest.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_file_needs_separator_after_id() {
        assert!(is_sample_file("SRR1.fastq", "SRR1"));
        assert!(is_sample_file("SRR1_2.fastq", "SRR1"));
        assert!(!is_sample_file("SRR10_1.fastq", "SRR1"));
        assert!(!is_sample_file("SRR1", "SRR1"));
        assert!(!is_sample_file("XSRR1.fastq", "SRR1"));
    }
}
