use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::pipeline::constants::CONTAINER_VOLUME;
use crate::runtime::Error;

///////////////////////////////
/// Wrapper used to launch every external tool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ContainerTool {
    Docker,
    Udocker,
    Singularity,
    None,
}

impl ContainerTool {
    /// Executable that has to be on PATH for this wrapper, if any
    pub fn executable(&self) -> Option<&'static str> {
        match self {
            ContainerTool::Docker => Some("docker"),
            ContainerTool::Udocker => Some("udocker"),
            ContainerTool::Singularity => Some("singularity"),
            ContainerTool::None => None,
        }
    }

    /// Leading arguments placed before the image id. The docker-like tools mount the root
    /// directory at CONTAINER_VOLUME.
    pub fn prefix(&self, root: &Path) -> Vec<String> {
        match self {
            ContainerTool::Docker | ContainerTool::Udocker => vec![
                self.to_string(),
                "run".to_string(),
                "-v".to_string(),
                format!("{}:{}", root.display(), CONTAINER_VOLUME),
            ],
            ContainerTool::Singularity => vec![self.to_string(), "exec".to_string()],
            ContainerTool::None => Vec::new(),
        }
    }

    /// Whether the image id is part of the command line
    pub fn uses_image(&self) -> bool {
        !matches!(self, ContainerTool::None)
    }

    /// Whether `run <image>` with no program starts the image entrypoint
    pub fn runs_entrypoint(&self) -> bool {
        matches!(self, ContainerTool::Docker | ContainerTool::Udocker)
    }
}

impl fmt::Display for ContainerTool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ContainerTool::Docker => "docker",
            ContainerTool::Udocker => "udocker",
            ContainerTool::Singularity => "singularity",
            ContainerTool::None => "none",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ContainerTool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docker" => Ok(ContainerTool::Docker),
            "udocker" => Ok(ContainerTool::Udocker),
            "singularity" => Ok(ContainerTool::Singularity),
            "none" => Ok(ContainerTool::None),
            other => Err(Error::invalid_container_tool(other)),
        }
    }
}

impl TryFrom<String> for ContainerTool {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

///////////////////////////////
/// Image (or tool) identifiers per logical tool
#[derive(Clone, Debug, Deserialize)]
pub struct Containers {
    pub sra_tools: String,
    pub preprocess: String,
    pub quant: String,
    pub report: String,
}

///////////////////////////////
/// Job settings as read from the YAML settings file
#[derive(Clone, Debug, Deserialize)]
pub struct JobConfig {
    /// Prefix for the result and error-id files
    pub name: String,
    pub root_dir: PathBuf,
    /// Newline-delimited sample ids. Relative paths are taken from root_dir
    pub sra_list: PathBuf,
    pub num_threads: usize,
    pub container_tool: ContainerTool,
    pub containers: Containers,
    /// Quantification index, passed through to the quantifier as-is
    pub index: String,
}

impl JobConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<JobConfig, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::file_not_found(path));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::file_not_valid(path, Some(e.to_string())))?;
        JobConfig::from_yaml(&text).map_err(|e| match e {
            Error::FileNotValid { msg, .. } => Error::FileNotValid {
                path: path.to_path_buf(),
                msg,
            },
            other => other,
        })
    }

    pub fn from_yaml(text: &str) -> Result<JobConfig, Error> {
        let config: JobConfig = serde_yaml::from_str(text)
            .map_err(|e| Error::file_not_valid("<settings>", Some(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.num_threads < 1 {
            return Err(Error::invalid_thread_count(self.num_threads));
        }
        Ok(())
    }
}
