use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::pipeline::constants::DOWNLOAD_TMP_PREFIX;
use crate::pipeline::workdir::{entry_name, is_dir, is_file, is_sample_file, list_entries};

/// Delete every file in `dir` whose name ends with `suffix`. Returns how many were removed.
/// Files that cannot be removed are reported as warnings and skipped.
pub fn remove_files_with_suffix(dir: &Path, suffix: &str) -> usize {
    remove_files_matching(dir, |name| name.ends_with(suffix))
}

/// As `remove_files_with_suffix`, restricted to the files of one sample
pub fn remove_sample_files(dir: &Path, sample_id: &str, suffix: &str) -> usize {
    remove_files_matching(dir, |name| is_sample_file(name, sample_id) && name.ends_with(suffix))
}

fn remove_files_matching<F>(dir: &Path, matches: F) -> usize
where
    F: Fn(&str) -> bool,
{
    let entries = match list_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not list {} for cleanup: {}", dir.display(), e);
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.iter().filter(|e| is_file(e)) {
        let Some(name) = entry_name(entry) else {
            continue;
        };
        if !matches(name) {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => {
                debug!("Removed {}", name);
                removed += 1;
            }
            Err(e) => warn!("Failed to remove {}: {}", entry.path().display(), e),
        }
    }
    removed
}

/// Scratch directories left by the downloader after a crash
pub fn find_download_tmp_dirs(dir: &Path) -> Vec<PathBuf> {
    match list_entries(dir) {
        Ok(entries) => entries
            .iter()
            .filter(|e| is_dir(e))
            .filter(|e| entry_name(e).is_some_and(|n| n.starts_with(DOWNLOAD_TMP_PREFIX)))
            .map(|e| e.path().to_path_buf())
            .collect(),
        Err(e) => {
            warn!("Could not list {}: {}", dir.display(), e);
            Vec::new()
        }
    }
}

/// Remove all downloader scratch directories. Returns how many were removed.
pub fn remove_download_tmp_dirs(dir: &Path) -> usize {
    let mut removed = 0;
    for tmp in find_download_tmp_dirs(dir) {
        match fs::remove_dir_all(&tmp) {
            Ok(()) => {
                debug!("Removed tmpdir {}", tmp.display());
                removed += 1;
            }
            Err(e) => warn!("Failed to remove tmpdir {}: {}", tmp.display(), e),
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn no_matching_files_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("keep.txt")).unwrap();
        assert_eq!(remove_files_with_suffix(dir.path(), ".fastq"), 0);
        assert!(dir.path().join("keep.txt").exists());
    }

    #[test]
    fn removes_only_suffix_matches() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.fastq")).unwrap();
        File::create(dir.path().join("b.fastq")).unwrap();
        File::create(dir.path().join("a_trim.fastq.gz")).unwrap();
        assert_eq!(remove_files_with_suffix(dir.path(), ".fastq"), 2);
        assert!(dir.path().join("a_trim.fastq.gz").exists());
    }

    #[test]
    fn sample_scoped_removal_keeps_other_samples() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("SRR1_1.fastq")).unwrap();
        File::create(dir.path().join("SRR1_2.fastq")).unwrap();
        File::create(dir.path().join("SRR2.fastq")).unwrap();
        assert_eq!(remove_sample_files(dir.path(), "SRR1", ".fastq"), 2);
        assert!(dir.path().join("SRR2.fastq").exists());
    }

    #[test]
    fn sample_scoped_removal_keeps_longer_ids() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("SRR1.fastq")).unwrap();
        File::create(dir.path().join("SRR10_1.fastq")).unwrap();
        File::create(dir.path().join("SRR10_2.fastq")).unwrap();
        assert_eq!(remove_sample_files(dir.path(), "SRR1", ".fastq"), 1);
        assert!(dir.path().join("SRR10_1.fastq").exists());
        assert!(dir.path().join("SRR10_2.fastq").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_reads_lose_the_link_not_the_target() {
        let store = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        File::create(store.path().join("SRR1.fastq")).unwrap();
        std::os::unix::fs::symlink(store.path().join("SRR1.fastq"), dir.path().join("SRR1.fastq"))
            .unwrap();
        assert_eq!(remove_sample_files(dir.path(), "SRR1", ".fastq"), 1);
        assert!(!dir.path().join("SRR1.fastq").exists());
        assert!(store.path().join("SRR1.fastq").exists());
    }

    #[test]
    fn tmp_dirs_are_found_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("fasterq.tmp.host.123/sub")).unwrap();
        fs::create_dir(dir.path().join("SRR1_exp")).unwrap();
        assert_eq!(find_download_tmp_dirs(dir.path()).len(), 1);
        assert_eq!(remove_download_tmp_dirs(dir.path()), 1);
        assert!(find_download_tmp_dirs(dir.path()).is_empty());
        assert!(dir.path().join("SRR1_exp").exists());
    }
}
