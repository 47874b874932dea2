use std::path::PathBuf;

use anyhow::Context;

use crate::pipeline::constants::OUTPUT_DIR_SUFFIX;
use crate::runtime::{Error, JobConfig};
use crate::utils::expand_and_resolve_path;

/// Everything a job needs to know about where it runs. Passed explicitly to every
/// component; the process working directory is never changed.
#[derive(Clone, Debug)]
pub struct JobContext {
    /// Absolute root directory. All downloads, intermediates and outputs live here
    pub root: PathBuf,
    pub config: JobConfig,
}

impl JobContext {
    pub fn new(config: JobConfig) -> anyhow::Result<JobContext> {
        let root = expand_and_resolve_path(&config.root_dir)
            .with_context(|| format!("Could not resolve root dir {:?}", config.root_dir))?;
        if !root.is_dir() {
            return Err(Error::file_not_found(&root).into());
        }
        Ok(JobContext { root, config })
    }

    pub fn sample_list_path(&self) -> PathBuf {
        self.root.join(&self.config.sra_list)
    }

    pub fn result_csv_path(&self) -> PathBuf {
        self.root.join(format!("{}_result.csv", self.config.name))
    }

    pub fn error_ids_path(&self) -> PathBuf {
        self.root.join(format!("{}_error_ids.txt", self.config.name))
    }

    /// Quantifier output for one sample, relative to root
    pub fn output_dir_name(sample_id: &str) -> String {
        format!("{}{}", sample_id, OUTPUT_DIR_SUFFIX)
    }

    pub fn is_already_processed(&self, sample_id: &str) -> bool {
        self.root.join(Self::output_dir_name(sample_id)).is_dir()
    }
}
