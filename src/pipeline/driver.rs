use log::{debug, error, info, warn};

use crate::fileformat::write_error_ids;
use crate::pipeline::cleaner::{
    find_download_tmp_dirs, remove_download_tmp_dirs, remove_sample_files,
};
use crate::pipeline::constants::{RAW_READ_SUFFIX, TRIMMED_READ_SUFFIX};
use crate::pipeline::layout::detect_layout;
use crate::pipeline::summary::{collect_summary, write_summary};
use crate::pipeline::{CommandRunner, InvocationBuilder, JobContext, Stage};

///////////////////////////////
/// Why a sample ended up in the error list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// No raw reads, or more than two files
    Layout,
    Trim,
    Quantify,
}

///////////////////////////////
/// Terminal state of one sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleOutcome {
    Done,
    /// Output directory already present
    Skipped,
    Failed(FailureKind),
}

///////////////////////////////
/// How the download stage went. The sample continues in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    Ok,
    /// Failed at the configured thread count, then succeeded single-threaded
    Recovered,
    Failed,
}

/// Per-sample dispositions of one run. Every input id lands in exactly one list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub done: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.done.len() + self.skipped.len() + self.errors.len()
    }

    fn record(&mut self, sample_id: &str, outcome: SampleOutcome) {
        let list = match outcome {
            SampleOutcome::Done => &mut self.done,
            SampleOutcome::Skipped => &mut self.skipped,
            SampleOutcome::Failed(_) => &mut self.errors,
        };
        list.push(sample_id.to_string());
    }
}

/// Result of the once-per-job steps after the sample loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostStepReport {
    pub converted: bool,
    pub reported: bool,
}

/// Sequential per-sample driver: download, layout check, trim, quantify, cleanup.
/// Failures are recorded per sample and never stop the batch.
pub struct Pipeline<'a, R: CommandRunner> {
    ctx: &'a JobContext,
    runner: R,
}

impl<'a, R: CommandRunner> Pipeline<'a, R> {
    pub fn new(ctx: &'a JobContext, runner: R) -> Self {
        Self { ctx, runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Process all samples, run the post steps, then write the error id list and the
    /// result CSV into the root directory. Both files are attempted even if one fails.
    pub fn run(&mut self, sample_ids: &[String]) -> anyhow::Result<RunReport> {
        let report = self.run_samples(sample_ids);
        info!("all of preprocess steps are done!");

        self.run_post_steps();

        let ids_written = write_error_ids(&self.ctx.error_ids_path(), &report.errors);
        let rows = collect_summary(&self.ctx.root);
        let summary_written = write_summary(&self.ctx.result_csv_path(), &rows);
        ids_written?;
        summary_written?;
        Ok(report)
    }

    pub fn run_samples(&mut self, sample_ids: &[String]) -> RunReport {
        let mut report = RunReport::default();
        for sample_id in sample_ids {
            let outcome = self.process_sample(sample_id);
            debug!("{} finished as {:?}", sample_id, outcome);
            report.record(sample_id, outcome);
        }
        report
    }

    pub fn process_sample(&mut self, sample_id: &str) -> SampleOutcome {
        if self.ctx.is_already_processed(sample_id) {
            warn!("{} is already analyzed! skip this id...", sample_id);
            return SampleOutcome::Skipped;
        }

        info!("+++++ start {} +++++", sample_id);
        let ctx = self.ctx;
        let root = ctx.root.as_path();
        let builder = InvocationBuilder::new(ctx);

        // Earlier partial downloads may still be usable, so carry on regardless
        let download = self.download(sample_id);
        debug!("download of {}: {:?}", sample_id, download);

        let layout = detect_layout(root, sample_id);
        debug!("{} layout is {}", sample_id, layout);
        let (Some(trim), Some(quantify)) = (
            builder.trim(sample_id, layout),
            builder.quantify(sample_id, layout),
        ) else {
            error!("no {} read files usable! skip this {} ...", sample_id, sample_id);
            return SampleOutcome::Failed(FailureKind::Layout);
        };

        info!("\trun {}...", Stage::Trim.program());
        if let Err(e) = self.runner.run(&trim) {
            error!(
                "{} failed! please confirm manually {}: {}",
                Stage::Trim.program(),
                sample_id,
                e
            );
            remove_sample_files(root, sample_id, RAW_READ_SUFFIX);
            return SampleOutcome::Failed(FailureKind::Trim);
        }
        debug!("delete fastq files....");
        remove_sample_files(root, sample_id, RAW_READ_SUFFIX);

        info!("\trun {}...", Stage::Quantify.program());
        if let Err(e) = self.runner.run(&quantify) {
            error!(
                "{} failed! please confirm manually {}: {}",
                Stage::Quantify.program(),
                sample_id,
                e
            );
            remove_sample_files(root, sample_id, TRIMMED_READ_SUFFIX);
            return SampleOutcome::Failed(FailureKind::Quantify);
        }
        debug!("delete trim fastq files....");
        remove_sample_files(root, sample_id, TRIMMED_READ_SUFFIX);

        info!("+++++ end {} +++++", sample_id);
        SampleOutcome::Done
    }

    /// Download with the configured thread count. A crash that leaves downloader
    /// scratch dirs behind is retried once single-threaded; the multi-threaded
    /// downloader is known to segfault.
    pub fn download(&mut self, sample_id: &str) -> DownloadOutcome {
        let ctx = self.ctx;
        let root = ctx.root.as_path();
        let num_threads = ctx.config.num_threads;
        let builder = InvocationBuilder::new(ctx);

        info!("\tstart downloading...");
        let Err(e) = self.runner.run(&builder.download(sample_id, num_threads)) else {
            return DownloadOutcome::Ok;
        };
        error!("downloading process is failed for {}: {}", sample_id, e);

        if num_threads == 1 || find_download_tmp_dirs(root).is_empty() {
            error!("Please check {} manually!", sample_id);
            return DownloadOutcome::Failed;
        }

        error!(
            "Maybe fetching {} is failed because of Segmentation fault! Retry download single core mode...",
            sample_id
        );
        match self.runner.run(&builder.download(sample_id, 1)) {
            Ok(()) => DownloadOutcome::Recovered,
            Err(e) => {
                error!(
                    "Single core mode is also failed! Please check {} manually! ({})",
                    sample_id, e
                );
                debug!("remove tmpdir...");
                remove_download_tmp_dirs(root);
                DownloadOutcome::Failed
            }
        }
    }

    /// quant.sf conversion and the combined report, once per job. Failures are logged only.
    pub fn run_post_steps(&mut self) -> PostStepReport {
        let builder = InvocationBuilder::new(self.ctx);

        info!("convert salmon quant.sf to tsv files...");
        let converted = match self.runner.run(&builder.convert()) {
            Ok(()) => true,
            Err(e) => {
                error!("convert salmon quant.sf step is failed! {}", e);
                false
            }
        };

        info!("integrating reports...");
        let reported = match self.runner.run(&builder.report()) {
            Ok(()) => true,
            Err(e) => {
                error!("Integrating reports step is failed! {}", e);
                false
            }
        };

        PostStepReport {
            converted,
            reported,
        }
    }
}
