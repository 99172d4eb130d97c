pub mod digest;
pub mod engine;
pub mod fetcher;
pub mod filter;
pub mod notifier;
pub mod pipeline;
pub mod selector;

pub use crate::domain::model::{Digest, PageRequest, PageResult, Posting, PostingId};
pub use crate::domain::ports::{ListingSource, Mailer, WatermarkStore};
pub use crate::utils::error::Result;
