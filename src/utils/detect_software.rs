use log::debug;
use log::info;
use std::process::{Command, Stdio};

use crate::runtime::Error;

/// Check that a program can be launched at all. The exit status is ignored since many
/// tools return non-zero when called without arguments.
pub fn check_executable(program: &str) -> Result<(), Error> {
    debug!("Checking for {}", program);
    let launched = Command::new(program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match launched {
        Ok(_) => {
            info!("Found {}", program);
            Ok(())
        }
        Err(_) => Err(Error::utility_not_executable(program)),
    }
}
