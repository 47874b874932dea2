use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::{info, warn};

use crate::fileformat::read_sample_ids;
use crate::pipeline::{JobContext, Pipeline, ProcessRunner, Stage};
use crate::runtime::{setup_global_logger, ContainerTool, JobConfig, LogLevel};
use crate::utils::check_executable;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Args)]
pub struct RunCMD {
    /// YAML settings file describing the job
    #[arg(short = 's', long = "settings", value_parser = clap::value_parser!(PathBuf))]
    pub path_settings: PathBuf,

    /// One of error, warning, warn, info, debug
    #[arg(long = "log_level", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: LogLevel,
}
impl RunCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        setup_global_logger(self.log_level);

        info!("Settings file: {}", self.path_settings.display());
        let config = JobConfig::from_path(&self.path_settings)
            .with_context(|| format!("Failed to load settings {}", self.path_settings.display()))?;

        RunJob::run(config)?;

        log::info!("Pipeline has finished");
        Ok(())
    }
}

/// One batch quantification job
pub struct RunJob;
impl RunJob {
    pub fn run(config: JobConfig) -> Result<()> {
        info!("JOB_NAME: {}", config.name);
        let ctx = JobContext::new(config)?;
        info!("ROOT_DIR: {}", ctx.root.display());

        let path_list = ctx.sample_list_path();
        info!("SRA_ID_LIST: {}", path_list.display());
        let sample_ids = read_sample_ids(&path_list)?;
        log::debug!("{:?}", sample_ids);

        info!("----- start processing {} ids... -----", sample_ids.len());
        info!("using {} threads...", ctx.config.num_threads);

        check_tools(&ctx);

        let mut pipeline = Pipeline::new(&ctx, ProcessRunner::new(&ctx.root));
        let report = pipeline.run(&sample_ids)?;

        info!(
            "{} done, {} skipped, {} failed",
            report.done.len(),
            report.skipped.len(),
            report.errors.len()
        );
        if !report.errors.is_empty() {
            warn!(
                "Failed ids are listed in {}",
                ctx.error_ids_path().display()
            );
        }
        Ok(())
    }
}

/// Executables the job launches: every stage program when running without a
/// container, otherwise only the container tool itself
pub fn required_programs(tool: ContainerTool) -> Vec<&'static str> {
    match tool {
        ContainerTool::None => [
            Stage::Download,
            Stage::Trim,
            Stage::Quantify,
            Stage::Convert,
            Stage::Report,
        ]
        .iter()
        .map(|stage| stage.program())
        .collect(),
        tool => tool.executable().into_iter().collect(),
    }
}

/// Check that the executables the job depends on can be launched. Missing ones only
/// produce a warning; the affected samples or post steps will fail and be logged.
fn check_tools(ctx: &JobContext) {
    for program in required_programs(ctx.config.container_tool) {
        if let Err(e) = check_executable(program) {
            warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_mode_needs_every_stage_program() {
        assert_eq!(
            required_programs(ContainerTool::None),
            vec!["fasterq-dump", "fastp", "salmon", "Rscript", "multiqc"]
        );
    }

    #[test]
    fn container_mode_needs_only_the_tool() {
        assert_eq!(required_programs(ContainerTool::Docker), vec!["docker"]);
        assert_eq!(required_programs(ContainerTool::Singularity), vec!["singularity"]);
    }
}
