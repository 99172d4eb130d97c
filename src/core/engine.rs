use crate::core::notifier::Notifier;
use crate::core::pipeline::{DigestPipeline, Plan};
use crate::core::{ListingSource, Mailer, PostingId, Result, WatermarkStore};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    NoEligible {
        interrupted: Option<u16>,
    },
    UpToDate,
    Sent {
        count: usize,
        unseen: usize,
        checkpoint: PostingId,
    },
}

pub struct DigestEngine<S: ListingSource, M: Mailer, W: WatermarkStore> {
    pipeline: DigestPipeline<S>,
    notifier: Notifier<M>,
    store: W,
}

impl<S: ListingSource, M: Mailer, W: WatermarkStore> DigestEngine<S, M, W> {
    pub fn new(pipeline: DigestPipeline<S>, notifier: Notifier<M>, store: W) -> Self {
        Self {
            pipeline,
            notifier,
            store,
        }
    }

    pub async fn run_today(&self) -> Result<RunOutcome> {
        self.run(chrono::Local::now().date_naive()).await
    }

    /// One complete run. The watermark is read once up front and written only
    /// after a successful send.
    pub async fn run(&self, today: NaiveDate) -> Result<RunOutcome> {
        let watermark = self.store.load().await?;
        match &watermark {
            Some(id) => tracing::info!("🔖 Last notified posting: {}", id),
            None => tracing::info!("🔖 No previous watermark, treating all postings as new"),
        }

        match self.pipeline.plan(watermark.as_ref(), today).await? {
            Plan::NoEligible { interrupted } => {
                match interrupted {
                    Some(status) => tracing::warn!(
                        "❌ No matching postings (listing incomplete, upstream returned {})",
                        status
                    ),
                    None => tracing::info!("❌ No matching postings"),
                }
                Ok(RunOutcome::NoEligible { interrupted })
            }
            Plan::UpToDate { checkpoint } => {
                tracing::info!("📭 No new postings since {}, skipping mail", checkpoint);
                Ok(RunOutcome::UpToDate)
            }
            Plan::Deliver(delivery) => {
                if let Some(status) = delivery.interrupted {
                    tracing::warn!(
                        "⚠️ Listing was cut short by upstream status {}; sending what was loaded",
                        status
                    );
                }
                self.notifier
                    .deliver(&delivery.digest, &delivery.checkpoint, &self.store)
                    .await?;
                Ok(RunOutcome::Sent {
                    count: delivery.digest.posting_count,
                    unseen: delivery.unseen,
                    checkpoint: delivery.checkpoint,
                })
            }
        }
    }
}
