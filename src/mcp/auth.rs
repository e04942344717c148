//! Bearer token authentication for the HTTP transport.
//!
//! The HTTP transport accepts a single static bearer token, read from the
//! `HABITRACK_TOKEN` environment variable. Stdio needs no authentication:
//! whoever spawned the process already owns its stdio.

use crate::{Error, Result};

/// Environment variable holding the expected bearer token.
pub const TOKEN_ENV_VAR: &str = "HABITRACK_TOKEN";

/// Minimum accepted token length.
const MIN_TOKEN_LENGTH: usize = 16;

/// Validates `Authorization: Bearer <token>` headers against a static
/// secret.
#[derive(Clone)]
pub struct BearerAuthenticator {
    token: String,
}

impl std::fmt::Debug for BearerAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret.
        f.debug_struct("BearerAuthenticator").finish_non_exhaustive()
    }
}

impl BearerAuthenticator {
    /// Creates an authenticator with the given secret token.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the token is shorter than 16
    /// characters.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.len() < MIN_TOKEN_LENGTH {
            return Err(Error::InvalidInput(format!(
                "bearer token must be at least {MIN_TOKEN_LENGTH} characters"
            )));
        }
        Ok(Self { token })
    }

    /// Creates an authenticator from the `HABITRACK_TOKEN` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the variable is unset or the token
    /// is too short.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV_VAR).map_err(|_| {
            Error::InvalidInput(format!(
                "{TOKEN_ENV_VAR} must be set to serve over HTTP"
            ))
        })?;
        Self::new(token)
    }

    /// Validates an `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unauthorized` if the header is not a bearer scheme
    /// or the token does not match.
    pub fn validate_header(&self, header: &str) -> Result<()> {
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| Error::Unauthorized("expected bearer authorization".to_string()))?;

        if constant_time_eq(token.as_bytes(), self.token.as_bytes()) {
            Ok(())
        } else {
            Err(Error::Unauthorized("invalid bearer token".to_string()))
        }
    }
}

/// Compares two byte strings without short-circuiting on the first
/// mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
