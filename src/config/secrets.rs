//! Per-route shared secrets.
//!
//! Webhook routes cannot use normal authentication (the provider composes
//! the call), so each route optionally carries a shared secret the
//! provider echoes in its payload. An unset secret disables the check for
//! that route.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use subtle::ConstantTimeEq;

/// Optional shared secret for one webhook route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SharedSecret(Option<SecretString>);

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Some(SecretString::new(secret.into())))
    }

    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Checks a payload's secret against the configured one in constant
    /// time. Always passes when no secret is configured.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        match &self.0 {
            None => true,
            Some(expected) => {
                let expected = expected.expose_secret().as_bytes();
                let presented = presented.unwrap_or_default().as_bytes();
                expected.ct_eq(presented).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_secret_accepts_anything() {
        let secret = SharedSecret::disabled();
        assert!(secret.verify(None));
        assert!(secret.verify(Some("whatever")));
    }

    #[test]
    fn enabled_secret_requires_exact_match() {
        let secret = SharedSecret::new("s3cret");
        assert!(secret.verify(Some("s3cret")));
        assert!(!secret.verify(Some("wrong")));
        assert!(!secret.verify(None));
    }

    #[test]
    fn debug_output_does_not_leak_the_secret() {
        let secret = SharedSecret::new("s3cret");
        assert!(!format!("{:?}", secret).contains("s3cret"));
    }
}
