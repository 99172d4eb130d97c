use crate::core::{Digest, Mailer, PostingId, Result, WatermarkStore};

pub struct Notifier<M: Mailer> {
    mailer: M,
    recipient: String,
}

impl<M: Mailer> Notifier<M> {
    pub fn new(mailer: M, recipient: impl Into<String>) -> Self {
        Self {
            mailer,
            recipient: recipient.into(),
        }
    }

    /// Sends the digest, then advances the watermark to `checkpoint`.
    /// A failed send leaves the watermark where it was.
    pub async fn deliver<W: WatermarkStore>(
        &self,
        digest: &Digest,
        checkpoint: &PostingId,
        store: &W,
    ) -> Result<()> {
        tracing::info!(
            "✉️ Sending digest with {} posting(s) to {}",
            digest.posting_count,
            self.recipient
        );
        self.mailer.send(&self.recipient, digest).await?;
        tracing::info!("✅ Digest delivered to {}", self.recipient);

        store.save(checkpoint).await?;
        tracing::debug!("Watermark advanced to {}", checkpoint);
        Ok(())
    }
}
