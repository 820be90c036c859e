//! Configuration, errors and logging shared by the harness

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
