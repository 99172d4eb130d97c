use crate::config::AppConfig;
use crate::core::digest::DigestFormatter;
use crate::core::fetcher::ListingFetcher;
use crate::core::filter::filter_by_experience;
use crate::core::selector::{select_new, Selection};
use crate::core::{Digest, ListingSource, PostingId, Result};
use crate::utils::validation::validate_positive_number;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub digest: Digest,
    pub checkpoint: PostingId,
    pub unseen: usize,
    pub interrupted: Option<u16>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    NoEligible { interrupted: Option<u16> },
    UpToDate { checkpoint: PostingId },
    Deliver(Delivery),
}

/// Fetch, filter, select and render. Reads from the listing source only; the
/// watermark is passed in and never written here.
pub struct DigestPipeline<S: ListingSource> {
    fetcher: ListingFetcher<S>,
    formatter: DigestFormatter,
    experience_years: u32,
    max_batch: usize,
}

impl<S: ListingSource> DigestPipeline<S> {
    pub fn new(source: S, config: &AppConfig) -> Result<Self> {
        validate_positive_number("delivery.max_batch", config.delivery.max_batch, 1)?;

        Ok(Self {
            fetcher: ListingFetcher::new(
                source,
                config.source.category_id,
                config.source.max_pages,
                config.page_delay(),
            ),
            formatter: DigestFormatter::new(
                &config.delivery.detail_base_url,
                config.delivery.subject_label.clone(),
            )?,
            experience_years: config.filter.experience_years,
            max_batch: config.delivery.max_batch,
        })
    }

    pub async fn plan(&self, watermark: Option<&PostingId>, today: NaiveDate) -> Result<Plan> {
        let report = self.fetcher.fetch().await?;
        let eligible = filter_by_experience(report.postings, self.experience_years);
        tracing::info!(
            "🎯 {} posting(s) require exactly {} year(s) of experience",
            eligible.len(),
            self.experience_years
        );

        match select_new(&eligible, watermark, self.max_batch) {
            Selection::Empty => Ok(Plan::NoEligible {
                interrupted: report.interrupted,
            }),
            Selection::UpToDate => Ok(Plan::UpToDate {
                checkpoint: eligible[0].id.clone(),
            }),
            Selection::Fresh {
                postings,
                unseen,
                checkpoint,
            } => {
                if unseen > postings.len() {
                    tracing::info!(
                        "{} new posting(s) found, keeping the newest {}",
                        unseen,
                        postings.len()
                    );
                }
                Ok(Plan::Deliver(Delivery {
                    digest: self.formatter.render(&postings, today)?,
                    checkpoint,
                    unseen,
                    interrupted: report.interrupted,
                }))
            }
        }
    }
}
