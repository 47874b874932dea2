mod config;
mod error;
mod logger;

pub use config::*;
pub use error::Error;
pub use logger::*;
