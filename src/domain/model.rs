use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Upstream identifier of a posting. The listing API sends integers, but only
/// equality matters here, so it is kept as text (the same form the watermark
/// file stores).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostingId(String);

impl PostingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostingId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for PostingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => PostingId(n.to_string()),
            RawId::Text(s) => PostingId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ApiPosting")]
pub struct Posting {
    pub id: PostingId,
    pub company: String,
    pub position: String,
    pub location: String,
    pub reward: Option<String>,
    /// Minimum required experience in years.
    pub annual_from: u32,
}

// Wire shape of one entry in the listing API's `data` array. Everything but
// the id is optional so one odd entry cannot fail the whole page.
#[derive(Debug, Deserialize)]
struct ApiPosting {
    id: PostingId,
    #[serde(default)]
    company: Option<ApiCompany>,
    #[serde(default)]
    position: String,
    #[serde(default)]
    address: Option<ApiAddress>,
    #[serde(default)]
    reward: Option<ApiReward>,
    #[serde(default, deserialize_with = "lenient_years")]
    annual_from: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiCompany {
    #[serde(default)]
    name: String,
}

// Negative counts clamp to 0; anything that is not an integer reads as absent.
fn lenient_years<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYears {
        Int(i64),
        Other(IgnoredAny),
    }

    Ok(match Option::<RawYears>::deserialize(deserializer)? {
        Some(RawYears::Int(n)) => Some(n.clamp(0, i64::from(u32::MAX)) as u32),
        Some(RawYears::Other(_)) | None => None,
    })
}

#[derive(Debug, Deserialize)]
struct ApiAddress {
    #[serde(default)]
    full_location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiReward {
    #[serde(default)]
    formatted_total: Option<String>,
}

impl From<ApiPosting> for Posting {
    fn from(raw: ApiPosting) -> Self {
        Self {
            id: raw.id,
            company: raw.company.map(|c| c.name).unwrap_or_default(),
            position: raw.position,
            location: raw
                .address
                .and_then(|a| a.full_location)
                .unwrap_or_default(),
            reward: raw.reward.and_then(|r| r.formatted_total),
            annual_from: raw.annual_from.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub category_id: u32,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageResult {
    Postings(Vec<Posting>),
    /// The upstream answered with a non-success HTTP status.
    Rejected { status: u16 },
}

/// Rendered notification for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    pub subject: String,
    pub html: String,
    pub posting_count: usize,
}
