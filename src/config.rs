//! Client configuration.
//!
//! Values come from command-line flags, then `PROMANAGE_*` environment
//! variables, then built-in defaults.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::board::domain::{BoardDomainError, OrgSlug};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/graphql/";
/// Organization used when none is configured.
pub const DEFAULT_ORG: &str = "acme";
/// Author and default assignee used when none is configured.
pub const DEFAULT_AUTHOR_EMAIL: &str = "me@demo.com";
/// Request deadline used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Environment variable naming the GraphQL endpoint.
pub const ENDPOINT_ENV: &str = "PROMANAGE_GRAPHQL_URL";
/// Environment variable naming the organization slug.
pub const ORG_ENV: &str = "PROMANAGE_ORG";
/// Environment variable naming the author email.
pub const AUTHOR_EMAIL_ENV: &str = "PROMANAGE_AUTHOR_EMAIL";
/// Environment variable holding the request timeout in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "PROMANAGE_TIMEOUT_MS";

/// Errors raised while building configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint is not an absolute HTTP(S) URL.
    #[error("invalid endpoint '{value}': {reason}")]
    InvalidEndpoint {
        /// Rejected value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The organization slug is invalid.
    #[error(transparent)]
    InvalidOrg(#[from] BoardDomainError),

    /// The author email is blank.
    #[error("author email must not be empty")]
    EmptyAuthorEmail,

    /// The timeout is not a positive number of milliseconds.
    #[error("invalid timeout '{0}', expected a positive number of milliseconds")]
    InvalidTimeout(String),
}

/// Connection and identity settings for the board client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: Url,
    org: OrgSlug,
    author_email: String,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Builds configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        let endpoint = value(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
        let org = value(ORG_ENV).unwrap_or_else(|| DEFAULT_ORG.to_owned());
        let author_email =
            value(AUTHOR_EMAIL_ENV).unwrap_or_else(|| DEFAULT_AUTHOR_EMAIL.to_owned());

        let request_timeout = value(TIMEOUT_MS_ENV)
            .map(|raw| parse_timeout_ms(&raw))
            .transpose()?
            .map_or(DEFAULT_TIMEOUT, Duration::from_millis);

        Ok(Self {
            endpoint: parse_endpoint(&endpoint)?,
            org: OrgSlug::new(org)?,
            author_email: author_email.trim().to_owned(),
            request_timeout,
        })
    }

    /// Replaces the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] for malformed or non-HTTP
    /// URLs.
    pub fn with_endpoint(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.endpoint = parse_endpoint(raw)?;
        Ok(self)
    }

    /// Replaces the organization.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOrg`] for blank or spaced slugs.
    pub fn with_org(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.org = OrgSlug::new(raw)?;
        Ok(self)
    }

    /// Replaces the author email.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthorEmail`] for blank input.
    pub fn with_author_email(mut self, raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyAuthorEmail);
        }
        trimmed.clone_into(&mut self.author_email);
        Ok(self)
    }

    /// Replaces the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] for zero.
    pub fn with_timeout_ms(mut self, millis: u64) -> Result<Self, ConfigError> {
        if millis == 0 {
            return Err(ConfigError::InvalidTimeout(millis.to_string()));
        }
        self.request_timeout = Duration::from_millis(millis);
        Ok(self)
    }

    /// GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Organization whose projects are listed.
    #[must_use]
    pub const fn org(&self) -> &OrgSlug {
        &self.org
    }

    /// Author of comments and default assignee of new tasks.
    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    /// Deadline for each service call.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        value: raw.to_owned(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

fn parse_timeout_ms(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|millis| *millis > 0)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_owned()))
}
