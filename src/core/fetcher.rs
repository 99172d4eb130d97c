use crate::core::{ListingSource, PageRequest, PageResult, Posting, Result};
use std::time::Duration;

pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    /// All postings in upstream order (newest first).
    pub postings: Vec<Posting>,
    pub pages: usize,
    /// Set when pagination stopped on a non-success status; `postings` then
    /// holds only what arrived before it.
    pub interrupted: Option<u16>,
}

pub struct ListingFetcher<S: ListingSource> {
    source: S,
    category_id: u32,
    max_pages: usize,
    page_delay: Duration,
}

impl<S: ListingSource> ListingFetcher<S> {
    pub fn new(source: S, category_id: u32, max_pages: usize, page_delay: Duration) -> Self {
        Self {
            source,
            category_id,
            max_pages,
            page_delay,
        }
    }

    pub async fn fetch(&self) -> Result<FetchReport> {
        let mut postings = Vec::new();
        let mut pages = 0;
        let mut offset = 0;

        loop {
            let request = PageRequest {
                category_id: self.category_id,
                offset,
                limit: PAGE_SIZE,
            };

            tracing::debug!("Requesting page at offset {}", offset);
            let page = match self.source.fetch_page(&request).await? {
                PageResult::Postings(page) => page,
                PageResult::Rejected { status } => {
                    tracing::warn!(
                        "⚠️ Listing request rejected with status {} at offset {}; keeping {} postings",
                        status,
                        offset,
                        postings.len()
                    );
                    return Ok(FetchReport {
                        postings,
                        pages,
                        interrupted: Some(status),
                    });
                }
            };

            if page.is_empty() {
                break;
            }

            let page_len = page.len();
            postings.extend(page);
            pages += 1;
            tracing::info!("📦 {} postings loaded", postings.len());

            if page_len < PAGE_SIZE || pages >= self.max_pages {
                break;
            }

            offset += PAGE_SIZE;
            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        tracing::info!(
            "✅ Loaded {} postings in {} page(s) (category {})",
            postings.len(),
            pages,
            self.category_id
        );

        Ok(FetchReport {
            postings,
            pages,
            interrupted: None,
        })
    }
}
