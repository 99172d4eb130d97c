use crate::utils::error::{DigestError, Result};
use std::fmt;

pub const SENDER_ADDRESS_VAR: &str = "MY_EMAIL";
pub const SENDER_SECRET_VAR: &str = "MY_PASSWORD";

/// SMTP login for the sending account.
#[derive(Clone)]
pub struct SenderCredentials {
    pub address: String,
    secret: String,
}

impl SenderCredentials {
    pub fn new(address: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            secret: secret.into(),
        }
    }

    /// Reads the sender from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        if let Some(e) = dotenv_failure(dotenvy::dotenv()) {
            tracing::warn!("⚠️ Ignoring unreadable .env file: {}", e);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| DigestError::MissingCredentialsError {
                    variable: name.to_string(),
                })
        };

        Ok(Self {
            address: read(SENDER_ADDRESS_VAR)?,
            secret: read(SENDER_SECRET_VAR)?,
        })
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// A missing `.env` is normal; anything else is worth reporting.
fn dotenv_failure<T>(result: dotenvy::Result<T>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("address", &self.address)
            .field("secret", &"<redacted>")
            .finish()
    }
}
