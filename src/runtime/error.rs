use thiserror::Error;

use crate::pipeline::Stage;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File at {:?} not found.", path)]
    FileNotFound { path: std::path::PathBuf },

    #[error("File at {:?} is invalid{}.", path, Error::format_msg_as_detail(msg))]
    FileNotValid {
        path: std::path::PathBuf,
        msg: Option<String>,
    },

    #[error(
        "Stage {} failed on execute '{}' ({})",
        stage,
        cmd,
        Error::format_exit_code(code)
    )]
    StageFailed {
        stage: Stage,
        cmd: String,
        code: Option<i32>,
    },

    #[error(
        "Failed trying to execute utility '{utility}'. Make sure it is in your $PATH and you have execution permissions."
    )]
    UtilityNotExecutable { utility: String },

    #[error(
        "The container tool '{value}' is invalid! Please select from docker, udocker, singularity or none"
    )]
    InvalidContainerTool { value: String },

    #[error("Thread count must be at least 1, got {value}")]
    InvalidThreadCount { value: usize },
}

impl Error {
    #[cold]
    pub fn file_not_found<P: AsRef<std::path::Path>>(path: P) -> Self {
        Error::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn file_not_valid<P: AsRef<std::path::Path>, M: Into<String>>(
        path: P,
        msg: Option<M>,
    ) -> Self {
        Error::FileNotValid {
            path: path.as_ref().to_path_buf(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn stage_failed<C: Into<String>>(stage: Stage, cmd: C, code: Option<i32>) -> Self {
        Error::StageFailed {
            stage,
            cmd: cmd.into(),
            code,
        }
    }

    #[cold]
    pub fn utility_not_executable<U: Into<String>>(utility: U) -> Self {
        Error::UtilityNotExecutable {
            utility: utility.into(),
        }
    }

    #[cold]
    pub fn invalid_container_tool<V: Into<String>>(value: V) -> Self {
        Error::InvalidContainerTool {
            value: value.into(),
        }
    }

    #[cold]
    pub fn invalid_thread_count(value: usize) -> Self {
        Error::InvalidThreadCount { value }
    }

    pub fn format_msg_as_detail(msg: &Option<String>) -> String {
        match msg {
            Some(m) => format!(" ({})", m),
            None => String::new(),
        }
    }

    fn format_exit_code(code: &Option<i32>) -> String {
        match code {
            Some(c) => format!("exit code {}", c),
            None => "terminated by signal".to_string(),
        }
    }
}
