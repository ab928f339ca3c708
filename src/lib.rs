pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::adapters::RoboflowClient;
pub use crate::config::Settings;
pub use crate::core::acquire::{acquire, AcquireOptions, AcquireReport, Acquisition};
pub use crate::domain::model::{DatasetTarget, DownloadOutcome};
pub use crate::utils::error::{AcquireError, Result};
