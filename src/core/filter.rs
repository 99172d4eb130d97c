use crate::core::Posting;

/// Keeps postings whose minimum required experience is exactly `years`,
/// preserving upstream order.
pub fn filter_by_experience(postings: Vec<Posting>, years: u32) -> Vec<Posting> {
    postings
        .into_iter()
        .filter(|p| p.annual_from == years)
        .collect()
}
