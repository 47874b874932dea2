pub mod cleaner;
pub mod constants;
pub mod layout;
pub mod summary;

mod context;
mod driver;
mod invocation;
mod runner;
mod workdir;

pub use context::JobContext;
pub use driver::{DownloadOutcome, FailureKind, Pipeline, PostStepReport, RunReport, SampleOutcome};
pub use invocation::{Invocation, InvocationBuilder, Stage};
pub use layout::{detect_layout, Layout};
pub use runner::{CommandRunner, ProcessRunner};
