use std::future::Future;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::resolver;
use crate::resolver::Unauthenticated;
use crate::token::Claims;
use crate::token::TokenError;
use crate::token::TokenIssuer;

/// Authentication coordinator combining password verification, token
/// issuance/validation, and identity resolution.
///
/// Holds the process-wide signing configuration, immutable after
/// construction; safe to share across concurrent requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// Plaintext/secret mismatch. Surfaced to end users as a generic
    /// "incorrect email or password", never distinguishing unknown
    /// principal from wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret
    /// * `algorithm` - Token signing algorithm
    /// * `default_ttl_minutes` - Default token lifetime
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl_minutes: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(secret, algorithm, default_ttl_minutes),
        }
    }

    /// Hash a password for storage.
    ///
    /// Note: this is CPU-bound and deliberately slow; do not hold unrelated
    /// locks across it.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - Claims to encode; expiry is injected at issuance
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(claims, None)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    /// * `ttl` - Optional lifetime overriding the configured default
    pub fn issue_token(&self, claims: &Claims, ttl: Option<Duration>) -> Result<String, TokenError> {
        self.token_issuer.issue(claims, ttl)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Invalid` - Token is malformed, forged, or expired (indistinguishable)
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_issuer.validate(token)
    }

    /// Resolve the requesting principal from a presented token.
    ///
    /// See [`resolver::resolve`] for the failure semantics.
    pub async fn resolve<P, F, Fut>(
        &self,
        token: Option<&str>,
        lookup: F,
    ) -> Result<P, Unauthenticated>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Option<P>>,
    {
        resolver::resolve(&self.token_issuer, token, lookup).await
    }
}
