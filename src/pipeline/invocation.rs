use std::fmt;

use crate::pipeline::constants::CONVERT_SCRIPT;
use crate::pipeline::{JobContext, Layout};

///////////////////////////////
/// External tool stages, in the order they run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Download,
    Trim,
    Quantify,
    Convert,
    Report,
}

impl Stage {
    /// Program started inside the container (or directly, without one)
    pub fn program(&self) -> &'static str {
        match self {
            Stage::Download => "fasterq-dump",
            Stage::Trim => "fastp",
            Stage::Quantify => "salmon",
            Stage::Convert => "Rscript",
            Stage::Report => "multiqc",
        }
    }

    /// The downloader is very chatty on stderr
    pub fn suppress_stderr(&self) -> bool {
        matches!(self, Stage::Download)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Download => "download",
            Stage::Trim => "trim",
            Stage::Quantify => "quantify",
            Stage::Convert => "convert",
            Stage::Report => "report",
        };
        write!(f, "{}", s)
    }
}

///////////////////////////////
/// One fully formed external process call, container prefix included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub stage: Stage,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::args_to_string(&self.args))
    }
}

///////////////////////////////
/// Builds the argument list for each stage from the job settings
pub struct InvocationBuilder<'a> {
    ctx: &'a JobContext,
}

impl<'a> InvocationBuilder<'a> {
    pub fn new(ctx: &'a JobContext) -> Self {
        Self { ctx }
    }

    fn wrap(&self, stage: Stage, image: &str, with_program: bool, args: Vec<String>) -> Invocation {
        let tool = self.ctx.config.container_tool;
        let mut full = tool.prefix(&self.ctx.root);
        if tool.uses_image() {
            full.push(image.to_string());
        }
        if with_program {
            full.push(stage.program().to_string());
        }
        full.extend(args);
        Invocation { stage, args: full }
    }

    pub fn download(&self, sample_id: &str, num_threads: usize) -> Invocation {
        self.wrap(
            Stage::Download,
            &self.ctx.config.containers.sra_tools,
            true,
            strings(&[sample_id, "-e", &num_threads.to_string()]),
        )
    }

    /// None for an invalid layout; there is nothing to trim
    pub fn trim(&self, sample_id: &str, layout: Layout) -> Option<Invocation> {
        let threads = self.ctx.config.num_threads.to_string();
        let report = format!("{}.html", sample_id);
        let args = match layout {
            Layout::Single => strings(&[
                "-i",
                &format!("{}.fastq", sample_id),
                "-o",
                &format!("{}_trim.fastq.gz", sample_id),
                "-w",
                &threads,
                "-h",
                &report,
            ]),
            Layout::Paired => strings(&[
                "-i",
                &format!("{}_1.fastq", sample_id),
                "-I",
                &format!("{}_2.fastq", sample_id),
                "-o",
                &format!("{}_1_trim.fastq.gz", sample_id),
                "-O",
                &format!("{}_2_trim.fastq.gz", sample_id),
                "-w",
                &threads,
                "-h",
                &report,
            ]),
            Layout::Invalid => return None,
        };
        Some(self.wrap(Stage::Trim, &self.ctx.config.containers.preprocess, true, args))
    }

    /// Automatic library type, bias correction and selective alignment validation
    pub fn quantify(&self, sample_id: &str, layout: Layout) -> Option<Invocation> {
        let mut args = strings(&["quant", "-i", &self.ctx.config.index, "-l", "A"]);
        match layout {
            Layout::Single => {
                args.extend(strings(&["-r", &format!("{}_trim.fastq.gz", sample_id)]));
            }
            Layout::Paired => {
                args.extend(strings(&[
                    "-1",
                    &format!("{}_1_trim.fastq.gz", sample_id),
                    "-2",
                    &format!("{}_2_trim.fastq.gz", sample_id),
                ]));
            }
            Layout::Invalid => return None,
        }
        args.extend(strings(&[
            "-p",
            &self.ctx.config.num_threads.to_string(),
            "--validateMappings",
            "--seqBias",
            "--gcBias",
            "--posBias",
            "-o",
            &JobContext::output_dir_name(sample_id),
        ]));
        Some(self.wrap(Stage::Quantify, &self.ctx.config.containers.quant, true, args))
    }

    /// quant.sf to TSV, once for the whole job
    pub fn convert(&self) -> Invocation {
        self.wrap(
            Stage::Convert,
            &self.ctx.config.containers.quant,
            true,
            strings(&[CONVERT_SCRIPT]),
        )
    }

    /// Combined QC report over the root directory. Docker-like tools start the image
    /// entrypoint, the others need the program named.
    pub fn report(&self) -> Invocation {
        let with_program = !self.ctx.config.container_tool.runs_entrypoint();
        self.wrap(
            Stage::Report,
            &self.ctx.config.containers.report,
            with_program,
            strings(&["."]),
        )
    }
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::runtime::{ContainerTool, Containers, JobConfig};

    fn context(tool: ContainerTool) -> JobContext {
        JobContext {
            root: PathBuf::from("/data/job"),
            config: JobConfig {
                name: "job".to_string(),
                root_dir: PathBuf::from("/data/job"),
                sra_list: PathBuf::from("ids.txt"),
                num_threads: 4,
                container_tool: tool,
                containers: Containers {
                    sra_tools: "sra".to_string(),
                    preprocess: "pre".to_string(),
                    quant: "quant".to_string(),
                    report: "report".to_string(),
                },
                index: "idx".to_string(),
            },
        }
    }

    #[test]
    fn only_download_silences_stderr() {
        assert!(Stage::Download.suppress_stderr());
        for stage in [Stage::Trim, Stage::Quantify, Stage::Convert, Stage::Report] {
            assert!(!stage.suppress_stderr(), "{} should keep stderr", stage);
        }
    }

    #[test]
    fn download_under_docker() {
        let ctx = context(ContainerTool::Docker);
        let inv = InvocationBuilder::new(&ctx).download("SRR1", 4);
        assert_eq!(
            inv.to_string(),
            "docker run -v /data/job:/local_volume sra fasterq-dump SRR1 -e 4"
        );
    }

    #[test]
    fn paired_trim_without_container() {
        let ctx = context(ContainerTool::None);
        let inv = InvocationBuilder::new(&ctx)
            .trim("SRR100", Layout::Paired)
            .unwrap();
        assert_eq!(
            inv.to_string(),
            "fastp -i SRR100_1.fastq -I SRR100_2.fastq -o SRR100_1_trim.fastq.gz \
             -O SRR100_2_trim.fastq.gz -w 4 -h SRR100.html"
        );
    }

    #[test]
    fn single_quantify_under_singularity() {
        let ctx = context(ContainerTool::Singularity);
        let inv = InvocationBuilder::new(&ctx)
            .quantify("SRR7", Layout::Single)
            .unwrap();
        assert_eq!(
            inv.to_string(),
            "singularity exec quant salmon quant -i idx -l A -r SRR7_trim.fastq.gz -p 4 \
             --validateMappings --seqBias --gcBias --posBias -o SRR7_exp"
        );
    }

    #[test]
    fn invalid_layout_has_no_invocation() {
        let ctx = context(ContainerTool::None);
        let builder = InvocationBuilder::new(&ctx);
        assert!(builder.trim("SRR1", Layout::Invalid).is_none());
        assert!(builder.quantify("SRR1", Layout::Invalid).is_none());
    }

    #[test]
    fn report_uses_entrypoint_only_for_docker_like_tools() {
        let ctx = context(ContainerTool::Udocker);
        assert_eq!(
            InvocationBuilder::new(&ctx).report().to_string(),
            "udocker run -v /data/job:/local_volume report ."
        );
        let ctx = context(ContainerTool::None);
        assert_eq!(InvocationBuilder::new(&ctx).report().to_string(), "multiqc .");
    }
}
