use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Symmetric-key token issuer and validator.
///
/// Signing secret, algorithm, and default lifetime are fixed at construction
/// and never mutated afterwards, so a single instance can be shared across
/// arbitrarily many concurrent requests without coordination.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret (at least 32 bytes for HS256)
    /// * `algorithm` - Signing algorithm, typically `Algorithm::HS256`
    /// * `default_ttl_minutes` - Lifetime applied when issuance omits a TTL
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            default_ttl: Duration::minutes(default_ttl_minutes),
        }
    }

    /// Issue a signed token from the given claims.
    ///
    /// The caller's claims are copied; `exp` is set to now plus `ttl` (or
    /// the configured default when omitted) and `iat` to now, overriding
    /// whatever the caller put there.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode; `sub` and extras are taken as-is
    /// * `ttl` - Optional lifetime overriding the configured default
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing or serialization failed
    pub fn issue(&self, claims: &Claims, ttl: Option<Duration>) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiry = now + ttl.unwrap_or(self.default_ttl);

        let mut to_encode = claims.clone();
        to_encode.exp = Some(expiry.timestamp());
        to_encode.iat = Some(now.timestamp());

        let header = Header::new(self.algorithm);

        encode(&header, &to_encode, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// The signature is checked against the configured secret and algorithm,
    /// and `exp` must lie in the future (zero leeway; a token is usable
    /// strictly before its expiry). Every failure maps to the same opaque
    /// `Invalid` error.
    ///
    /// # Errors
    /// * `Invalid` - Malformed token, bad signature, missing `exp`, or expired
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Algorithm::HS256, 1440)
    }

    #[test]
    fn test_issue_and_validate() {
        let issuer = issuer();
        let claims = Claims::for_subject("a@example.com");

        let token = issuer.issue(&claims, None).expect("Failed to issue token");
        let decoded = issuer.validate(&token).expect("Failed to validate token");

        assert_eq!(decoded.sub, Some("a@example.com".to_string()));
        assert!(decoded.exp.unwrap() > Utc::now().timestamp());
    }

    #[test]
    fn test_issue_applies_default_ttl() {
        let issuer = issuer();
        let token = issuer
            .issue(&Claims::for_subject("a@example.com"), None)
            .unwrap();
        let decoded = issuer.validate(&token).unwrap();

        let lifetime = decoded.exp.unwrap() - decoded.iat.unwrap();
        assert_eq!(lifetime, 1440 * 60);
    }

    #[test]
    fn test_issue_overrides_caller_expiry() {
        let issuer = issuer();
        // A caller-supplied exp must not shorten or extend the lifetime
        let claims = Claims::for_subject("a@example.com").with_expiration(1);

        let token = issuer.issue(&claims, None).unwrap();
        let decoded = issuer.validate(&token).unwrap();

        assert!(decoded.exp.unwrap() > Utc::now().timestamp());
    }

    #[test]
    fn test_validate_expired_token() {
        let issuer = issuer();
        let token = issuer
            .issue(
                &Claims::for_subject("a@example.com"),
                Some(Duration::minutes(-5)),
            )
            .unwrap();

        assert_eq!(issuer.validate(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_validate_wrong_secret() {
        let issuer = issuer();
        let other = TokenIssuer::new(b"another_secret_key_32_bytes_long!!", Algorithm::HS256, 1440);

        let token = issuer
            .issue(&Claims::for_subject("a@example.com"), None)
            .unwrap();

        assert_eq!(other.validate(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_validate_malformed_token() {
        let issuer = issuer();

        assert_eq!(
            issuer.validate("not.a.token"),
            Err(TokenError::Invalid)
        );
        assert_eq!(issuer.validate(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_failure_reasons_are_indistinguishable() {
        let issuer = issuer();
        let expired = issuer
            .issue(
                &Claims::for_subject("a@example.com"),
                Some(Duration::minutes(-5)),
            )
            .unwrap();

        // Expired and malformed tokens fail identically
        assert_eq!(
            issuer.validate(&expired).unwrap_err(),
            issuer.validate("garbage").unwrap_err()
        );
    }
}
