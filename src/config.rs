//! Service configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any store is
//! constructed. The schema mapping exists because deployments inherit link
//! tables under historical names; every identifier can be overridden without
//! touching SQL.
//!
//! ```bash
//! export BASE_URL="https://s.example.com"
//!
//! # Optional: map onto a legacy table layout
//! export LINKS_TABLE="urls"
//! export LINKS_RESOLVED_TOKEN_COLUMN="shortened"
//! export LINKS_REFERRAL_COUNT_COLUMN="referrals"
//! ```
//!
//! ## Required Variables
//!
//! - `BASE_URL` - Public base under which short URLs are composed
//!
//! ## Optional Variables
//!
//! - `LINKS_TABLE` - Link table name (default: `links`)
//! - `LINKS_ID_COLUMN` (default: `id`)
//! - `LINKS_URL_COLUMN` (default: `url`)
//! - `LINKS_AUTO_TOKEN_COLUMN` (default: `auto_token`)
//! - `LINKS_RESOLVED_TOKEN_COLUMN` (default: `resolved_token`)
//! - `LINKS_REFERRAL_COUNT_COLUMN` (default: `referral_count`)
//! - `LINKS_CREATED_AT_COLUMN` (default: `created_at`)

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::env;
use url::Url;

/// Shortener configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ShortenerConfig {
    /// Public base under which short URLs are composed.
    pub base_url: String,
    /// Table and column names the SQL stores splice into their statements.
    pub schema: LinkSchema,
}

/// Table and column names for the link table.
///
/// These are spliced into SQL as bare identifiers, which is why
/// [`ShortenerConfig::validate`] rejects anything that is not a plain
/// identifier.
#[derive(Debug, Clone)]
pub struct LinkSchema {
    pub table: String,
    pub id: String,
    pub url: String,
    pub auto_token: String,
    pub resolved_token: String,
    pub referral_count: String,
    pub created_at: String,
}

impl Default for LinkSchema {
    fn default() -> Self {
        Self {
            table: "links".to_string(),
            id: "id".to_string(),
            url: "url".to_string(),
            auto_token: "auto_token".to_string(),
            resolved_token: "resolved_token".to_string(),
            referral_count: "referral_count".to_string(),
            created_at: "created_at".to_string(),
        }
    }
}

impl LinkSchema {
    /// Loads the schema mapping, falling back to defaults per identifier.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            table: env::var("LINKS_TABLE").unwrap_or(d.table),
            id: env::var("LINKS_ID_COLUMN").unwrap_or(d.id),
            url: env::var("LINKS_URL_COLUMN").unwrap_or(d.url),
            auto_token: env::var("LINKS_AUTO_TOKEN_COLUMN").unwrap_or(d.auto_token),
            resolved_token: env::var("LINKS_RESOLVED_TOKEN_COLUMN").unwrap_or(d.resolved_token),
            referral_count: env::var("LINKS_REFERRAL_COUNT_COLUMN").unwrap_or(d.referral_count),
            created_at: env::var("LINKS_CREATED_AT_COLUMN").unwrap_or(d.created_at),
        }
    }

    /// Identifier fields paired with the env var that sets each one.
    fn identifiers(&self) -> [(&'static str, &str); 7] {
        [
            ("LINKS_TABLE", self.table.as_str()),
            ("LINKS_ID_COLUMN", self.id.as_str()),
            ("LINKS_URL_COLUMN", self.url.as_str()),
            ("LINKS_AUTO_TOKEN_COLUMN", self.auto_token.as_str()),
            ("LINKS_RESOLVED_TOKEN_COLUMN", self.resolved_token.as_str()),
            ("LINKS_REFERRAL_COUNT_COLUMN", self.referral_count.as_str()),
            ("LINKS_CREATED_AT_COLUMN", self.created_at.as_str()),
        ]
    }
}

impl ShortenerConfig {
    /// Creates a configuration with the default schema.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            schema: LinkSchema::default(),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `BASE_URL` is not set.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("BASE_URL").context("BASE_URL must be set")?;
        let schema = LinkSchema::from_env();

        Ok(Self { base_url, schema })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base_url` is not a valid http(s) URL
    /// - any schema name is not a bare SQL identifier
    /// - two columns share a name
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;

        match base.scheme() {
            "http" | "https" => {}
            other => anyhow::bail!("BASE_URL must use http or https, got '{}'", other),
        }

        for (name, value) in self.schema.identifiers() {
            if !is_valid_identifier(value) {
                anyhow::bail!("{} must be a bare SQL identifier, got '{}'", name, value);
            }
        }

        // Column names must be distinct; the table name is a separate namespace.
        let mut seen = HashSet::new();
        for (name, value) in self.schema.identifiers().into_iter().skip(1) {
            if !seen.insert(value) {
                anyhow::bail!("column names must be distinct, '{}' is reused by {}", value, name);
            }
        }

        Ok(())
    }
}

/// Checks that `name` is a plain SQL identifier: ASCII letter or underscore
/// first, letters, digits and underscores after.
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in the embedding binary).
pub fn load_from_env() -> Result<ShortenerConfig> {
    let config = ShortenerConfig::from_env()?;
    config.validate()?;
    Ok(config)
}
