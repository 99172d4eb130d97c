#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub filter: FilterConfig,
    pub delivery: DeliveryConfig,
    pub state: StateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub country: String,
    pub sort: String,
    pub category_id: u32,
    pub max_pages: usize,
    pub page_delay_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.wanted.co.kr/api/v4/jobs".to_string(),
            country: "kr".to_string(),
            sort: "job.latest_order".to_string(),
            // 경영/비즈니스 전체
            category_id: 518,
            max_pages: 5,
            page_delay_ms: 500,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Postings are kept only when their minimum experience equals this value.
    pub experience_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub max_batch: usize,
    /// Defaults to the sender address when unset.
    pub recipient: Option<String>,
    pub subject_label: String,
    pub detail_base_url: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_batch: 5,
            recipient: None,
            subject_label: "경영/비즈니스 신입".to_string(),
            detail_base_url: "https://www.wanted.co.kr/wd".to_string(),
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub watermark_path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            watermark_path: PathBuf::from("last_id.txt"),
        }
    }
}

impl AppConfig {
    pub fn page_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.source.page_delay_ms)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.source.timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_non_empty_string("source.country", &self.source.country)?;
        validation::validate_non_empty_string("source.sort", &self.source.sort)?;
        validation::validate_positive_number("source.max_pages", self.source.max_pages, 1)?;
        validation::validate_range("source.timeout_seconds", self.source.timeout_seconds, 1, 600)?;

        validation::validate_positive_number("delivery.max_batch", self.delivery.max_batch, 1)?;
        validation::validate_url("delivery.detail_base_url", &self.delivery.detail_base_url)?;
        validation::validate_non_empty_string("delivery.smtp_host", &self.delivery.smtp_host)?;
        validation::validate_range("delivery.smtp_port", self.delivery.smtp_port, 1, u16::MAX)?;
        if let Some(recipient) = &self.delivery.recipient {
            validation::validate_email_address("delivery.recipient", recipient)?;
        }

        validation::validate_path(
            "state.watermark_path",
            &self.state.watermark_path.to_string_lossy(),
        )?;

        Ok(())
    }
}
