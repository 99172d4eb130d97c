use crate::core::{Digest, Posting, Result};
use crate::utils::error::DigestError;
use askama::Template;
use chrono::NaiveDate;
use url::Url;

const MISSING_REWARD: &str = "N/A";

struct PostingCard<'a> {
    company: &'a str,
    position: &'a str,
    location: &'a str,
    reward: &'a str,
    detail_url: String,
}

#[derive(Template)]
#[template(path = "digest.html")]
struct DigestTemplate<'a> {
    date_label: &'a str,
    count: usize,
    cards: Vec<PostingCard<'a>>,
}

/// Renders selected postings into an HTML email digest.
#[derive(Debug, Clone)]
pub struct DigestFormatter {
    detail_base: Url,
    subject_label: String,
}

impl DigestFormatter {
    pub fn new(detail_base_url: &str, subject_label: impl Into<String>) -> Result<Self> {
        let detail_base =
            Url::parse(detail_base_url).map_err(|e| DigestError::InvalidConfigValueError {
                field: "delivery.detail_base_url".to_string(),
                value: detail_base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            detail_base,
            subject_label: subject_label.into(),
        })
    }

    /// Detail page link; the id is appended as one percent-encoded path segment.
    pub fn detail_url(&self, posting: &Posting) -> String {
        let mut url = self.detail_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(posting.id.as_str());
        }
        url.to_string()
    }

    pub fn render(&self, postings: &[Posting], date: NaiveDate) -> Result<Digest> {
        let date_label = date.format("%m월 %d일").to_string();

        let template = DigestTemplate {
            date_label: &date_label,
            count: postings.len(),
            cards: postings
                .iter()
                .map(|p| PostingCard {
                    company: &p.company,
                    position: &p.position,
                    location: &p.location,
                    reward: p.reward.as_deref().unwrap_or(MISSING_REWARD),
                    detail_url: self.detail_url(p),
                })
                .collect(),
        };

        Ok(Digest {
            subject: format!(
                "[원티드 알림] {} {} 공고 업데이트",
                date_label, self.subject_label
            ),
            html: template.render()?,
            posting_count: postings.len(),
        })
    }
}
