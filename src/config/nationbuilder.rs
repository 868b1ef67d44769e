//! NationBuilder connection configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// NationBuilder connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NationBuilderConfig {
    /// Nation slug, e.g. `myorg` for `myorg.nationbuilder.com`
    pub slug: String,

    /// API access token
    pub api_token: SecretString,

    /// Optional explicit API base URL; derived from the slug when unset
    #[serde(default)]
    pub api_url: Option<String>,
}

impl NationBuilderConfig {
    /// The v1 REST API base URL, derived from the slug unless overridden.
    pub fn api_url(&self) -> String {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.nationbuilder.com/api/v1", self.slug),
        }
    }

    pub fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }

    /// Validate NationBuilder configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.slug.is_empty() && self.api_url.is_none() {
            return Err(ValidationError::MissingRequired("NATIONBUILDER_SLUG"));
        }
        if self.api_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("NATIONBUILDER_API_TOKEN"));
        }
        if let Some(url) = &self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidApiUrl);
            }
        }
        Ok(())
    }
}
