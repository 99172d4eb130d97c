use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "job-digest")]
#[command(about = "Emails a digest of newly posted jobs matching a category and experience level")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Job category to poll
    #[arg(long)]
    pub category_id: Option<u32>,

    /// Exact minimum-experience value (years) a posting must require
    #[arg(long)]
    pub experience_years: Option<u32>,

    /// Maximum number of postings per digest
    #[arg(long)]
    pub max_batch: Option<usize>,

    /// Maximum number of listing pages to fetch
    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long)]
    pub watermark_path: Option<PathBuf>,

    /// Digest recipient (defaults to the sender address)
    #[arg(long)]
    pub recipient: Option<String>,

    /// Fetch and render the digest without sending it or touching the watermark
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliArgs {
    /// Defaults, then the config file (if any), then command-line flags.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(category_id) = self.category_id {
            config.source.category_id = category_id;
        }
        if let Some(years) = self.experience_years {
            config.filter.experience_years = years;
        }
        if let Some(max_batch) = self.max_batch {
            config.delivery.max_batch = max_batch;
        }
        if let Some(max_pages) = self.max_pages {
            config.source.max_pages = max_pages;
        }
        if let Some(path) = &self.watermark_path {
            config.state.watermark_path = path.clone();
        }
        if let Some(recipient) = &self.recipient {
            config.delivery.recipient = Some(recipient.clone());
        }
    }
}
