use std::io::Write;

use log::LevelFilter;

/// Verbosity accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);
impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.to_lowercase().as_str() {
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" | "warning" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => {
                return Err(format!(
                    "Invalid log level: {} (expected error, warning, warn, info or debug)",
                    s
                ))
            }
        };
        Ok(LogLevel(level))
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(LevelFilter::Info)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Install the terminal logger. Colored level tags, stderr, second-resolution timestamps.
///
/// A logger that is already installed is left alone, so several jobs can share one process.
pub fn setup_global_logger(log_level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(log_level.into())
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let level = buf.default_styled_level(record.level());
            writeln!(
                buf,
                "{} [ {} ] {}",
                buf.timestamp_seconds(),
                level,
                record.args()
            )
        })
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized, keeping the existing one");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_warn_spellings() {
        let a: LogLevel = "warn".parse().unwrap();
        let b: LogLevel = "WARNING".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.0, LevelFilter::Warn);
    }

    #[test]
    fn parse_rejects_trace() {
        assert!("trace".parse::<LogLevel>().is_err());
    }
}
