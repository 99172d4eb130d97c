use crate::domain::model::{Digest, PageRequest, PageResult, PostingId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// One page of postings from the upstream listing service.
///
/// A non-success status is reported as [`PageResult::Rejected`] so that the
/// caller can keep what it already has; transport and decoding failures are
/// errors.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult>;
}

/// Single-value persistence for the id of the most recently notified posting.
pub trait WatermarkStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<PostingId>>> + Send;
    fn save(&self, id: &PostingId) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, digest: &Digest) -> Result<()>;
}
