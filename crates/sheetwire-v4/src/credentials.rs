//! Bearer-token credentials supplied by the caller
//!
//! Obtaining and refreshing OAuth tokens is left to the caller's credential
//! type. The client only asks for the current token and, when it is missing
//! or expired, asks the credentials to refresh themselves once.

use chrono::{DateTime, Utc};
use sheetwire_core::error::{Error, Result};

/// Source of an OAuth access token.
pub trait Credentials {
    /// The current access token, if one has been obtained
    fn access_token(&self) -> Option<&str>;

    /// Whether the current token should no longer be used
    fn is_expired(&self) -> bool {
        false
    }

    /// Obtain a fresh token
    fn refresh(&mut self) -> Result<()>;
}

/// A fixed access token, optionally with an expiry time.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }
}

impl Credentials for AccessToken {
    fn access_token(&self) -> Option<&str> {
        Some(self.token.as_str()).filter(|t| !t.is_empty())
    }

    fn is_expired(&self) -> bool {
        self.expires_at.map_or(false, |at| at <= Utc::now())
    }

    fn refresh(&mut self) -> Result<()> {
        Err(Error::Authentication(
            "access token is missing or expired and cannot be refreshed".into(),
        ))
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl<C: Credentials + ?Sized> Credentials for Box<C> {
    fn access_token(&self) -> Option<&str> {
        (**self).access_token()
    }

    fn is_expired(&self) -> bool {
        (**self).is_expired()
    }

    fn refresh(&mut self) -> Result<()> {
        (**self).refresh()
    }
}

/// Return a usable token, refreshing the credentials first when needed.
pub fn bearer_token(credentials: &mut dyn Credentials) -> Result<String> {
    if credentials.access_token().is_none() || credentials.is_expired() {
        tracing::debug!("Refreshing access token");
        credentials.refresh()?;
    }
    credentials
        .access_token()
        .map(str::to_string)
        .ok_or_else(|| Error::Authentication("credentials produced no access token".into()))
}
