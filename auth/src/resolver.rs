use std::future::Future;

use thiserror::Error;

use crate::token::TokenIssuer;

/// Failure of request-scoped identity resolution.
///
/// One class covers every way resolution can fail: missing token, invalid or
/// expired token, missing subject claim, and a subject that no longer maps
/// to a principal. Collapsing "token valid but user gone" into the same
/// outcome as "bad token" avoids leaking account existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Authentication required")]
pub struct Unauthenticated;

/// Resolve the requesting principal from a presented bearer token.
///
/// The lookup collaborator maps the token's subject (the principal's natural
/// key) to a principal, or none. Its I/O is the only suspension point; the
/// resolver itself neither retries nor times out.
///
/// # Arguments
/// * `validator` - Token validator holding the signing configuration
/// * `token` - Bearer token as presented, if any
/// * `lookup` - Collaborator resolving a natural key to a principal
///
/// # Errors
/// * `Unauthenticated` - Any of the checks failed
pub async fn resolve<P, F, Fut>(
    validator: &TokenIssuer,
    token: Option<&str>,
    lookup: F,
) -> Result<P, Unauthenticated>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Option<P>>,
{
    let token = token.ok_or(Unauthenticated)?;

    let claims = validator.validate(token).map_err(|_| Unauthenticated)?;

    let subject = claims.sub.ok_or(Unauthenticated)?;

    lookup(subject).await.ok_or(Unauthenticated)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;

    use super::*;
    use crate::token::Claims;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Principal {
        email: String,
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test_secret_key_at_least_32_bytes!", Algorithm::HS256, 60)
    }

    async fn lookup_known(email: String) -> Option<Principal> {
        (email == "a@example.com").then(|| Principal { email })
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let issuer = issuer();
        let token = issuer
            .issue(&Claims::for_subject("a@example.com"), None)
            .unwrap();

        let principal = resolve(&issuer, Some(&token), lookup_known)
            .await
            .expect("Resolution failed");

        assert_eq!(principal.email, "a@example.com");
    }

    #[tokio::test]
    async fn test_resolve_missing_token() {
        let issuer = issuer();

        let result = resolve(&issuer, None, lookup_known).await;
        assert_eq!(result, Err(Unauthenticated));
    }

    #[tokio::test]
    async fn test_resolve_invalid_token() {
        let issuer = issuer();

        let result = resolve(&issuer, Some("garbage"), lookup_known).await;
        assert_eq!(result, Err(Unauthenticated));
    }

    #[tokio::test]
    async fn test_resolve_missing_subject() {
        let issuer = issuer();
        let token = issuer.issue(&Claims::new(), None).unwrap();

        let result = resolve(&issuer, Some(&token), lookup_known).await;
        assert_eq!(result, Err(Unauthenticated));
    }

    #[tokio::test]
    async fn test_resolve_deleted_principal() {
        let issuer = issuer();
        let token = issuer
            .issue(&Claims::for_subject("gone@example.com"), None)
            .unwrap();

        // Token is valid but the lookup finds nothing; same failure class
        // as a malformed token
        let result = resolve(&issuer, Some(&token), lookup_known).await;
        assert_eq!(result, Err(Unauthenticated));
    }
}
