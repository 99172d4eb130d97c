use crate::core::{Posting, PostingId};

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No eligible postings at all.
    Empty,
    /// Nothing to send: the newest visible posting is the watermark, or the
    /// batch size leaves no room.
    UpToDate,
    Fresh {
        /// Newest first, at most `max_batch` long.
        postings: Vec<Posting>,
        /// New postings seen before truncation.
        unseen: usize,
        /// Id of the newest visible posting; becomes the next watermark.
        checkpoint: PostingId,
    },
}

impl Selection {
    pub fn postings(&self) -> &[Posting] {
        match self {
            Selection::Fresh { postings, .. } => postings,
            _ => &[],
        }
    }
}

/// Picks the postings newer than `watermark` from a newest-first sequence.
///
/// When the watermark is absent or no longer visible, every posting counts as
/// new and only the newest `max_batch` are kept.
pub fn select_new(
    postings: &[Posting],
    watermark: Option<&PostingId>,
    max_batch: usize,
) -> Selection {
    let Some(newest) = postings.first() else {
        return Selection::Empty;
    };

    if watermark == Some(&newest.id) {
        return Selection::UpToDate;
    }

    let unseen = postings
        .iter()
        .position(|p| Some(&p.id) == watermark)
        .unwrap_or(postings.len());

    let kept = unseen.min(max_batch);
    if kept == 0 {
        return Selection::UpToDate;
    }

    Selection::Fresh {
        postings: postings[..kept].to_vec(),
        unseen,
        checkpoint: newest.id.clone(),
    }
}
