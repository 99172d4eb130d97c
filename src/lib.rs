pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{FileWatermarkStore, SmtpMailer, WantedClient};
pub use config::{credentials::SenderCredentials, AppConfig};
pub use crate::core::{
    engine::{DigestEngine, RunOutcome},
    notifier::Notifier,
    pipeline::{DigestPipeline, Plan},
};
pub use utils::error::{DigestError, Result};
