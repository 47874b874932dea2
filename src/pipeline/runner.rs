use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::pipeline::Invocation;
use crate::runtime::Error;
use crate::utils::command_to_string;

/// Executes one external tool call and reports success or failure. Output is never
/// parsed, and failures are never retried here.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), Error>;
}

/// Runs invocations as child processes in the job root, blocking until they exit
pub struct ProcessRunner {
    root: PathBuf,
}

impl ProcessRunner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), Error> {
        let Some((program, args)) = invocation.args.split_first() else {
            return Err(Error::utility_not_executable(invocation.stage.program()));
        };

        let mut process = Command::new(program);
        process
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null());
        if invocation.stage.suppress_stderr() {
            process.stderr(Stdio::null());
        }
        debug!("{} command: {}", invocation.stage, command_to_string(&process));

        let status = process
            .status()
            .map_err(|_| Error::utility_not_executable(program.as_str()))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::stage_failed(
                invocation.stage,
                command_to_string(&process),
                status.code(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Stage;

    fn invocation(stage: Stage, args: &[&str]) -> Invocation {
        Invocation {
            stage,
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn zero_exit_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ProcessRunner::new(dir.path());
        runner.run(&invocation(Stage::Trim, &["true"])).unwrap();
    }

    #[test]
    fn nonzero_exit_is_stage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ProcessRunner::new(dir.path());
        let err = runner
            .run(&invocation(Stage::Download, &["sh", "-c", "exit 3"]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::StageFailed {
                stage: Stage::Download,
                code: Some(3),
                ..
            }
        ));
    }

    #[test]
    fn runs_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ProcessRunner::new(dir.path());
        runner
            .run(&invocation(Stage::Quantify, &["touch", "marker"]))
            .unwrap();
        assert!(dir.path().join("marker").exists());
    }

    /// Succeeds when the child's stderr points at `target`
    #[cfg(target_os = "linux")]
    fn stderr_target_is(stage: Stage, target: &str) -> Invocation {
        invocation(
            stage,
            &[
                "sh",
                "-c",
                r#"test "$(readlink /proc/$$/fd/2)" = "$1""#,
                "sh",
                target,
            ],
        )
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn download_stderr_is_discarded_others_inherit() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ProcessRunner::new(dir.path());
        let own = std::fs::read_link("/proc/self/fd/2").unwrap();
        let own = own.to_string_lossy();

        runner
            .run(&stderr_target_is(Stage::Download, "/dev/null"))
            .unwrap();
        runner.run(&stderr_target_is(Stage::Trim, &own)).unwrap();
        runner.run(&stderr_target_is(Stage::Quantify, &own)).unwrap();
    }

    #[test]
    fn launch_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ProcessRunner::new(dir.path());
        let err = runner
            .run(&invocation(Stage::Report, &["surely-not-an-installed-program-42"]))
            .unwrap_err();
        assert!(matches!(err, Error::UtilityNotExecutable { .. }));
    }
}
