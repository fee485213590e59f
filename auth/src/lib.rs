//! Authentication and authorization core
//!
//! Stateless building blocks for credential handling:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-bounded bearer tokens (issuance and validation)
//! - Request-scoped identity resolution against a caller-supplied lookup
//!
//! The crate performs no I/O of its own; persistence and HTTP concerns stay
//! with the consuming service, which injects a lookup collaborator where
//! needed. All components are safe to share across concurrent requests.
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("password123").unwrap();
//! assert!(hasher.verify("password123", &hash));
//! ```
//!
//! ## Complete authentication flow
//! ```
//! use auth::{Algorithm, Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256, 1440);
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token with the principal's natural key
//! let claims = Claims::for_subject("u@example.com");
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Later: validate the presented token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("u@example.com"));
//! ```

pub mod authenticator;
pub mod password;
pub mod resolver;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jsonwebtoken::Algorithm;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use resolver::Unauthenticated;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
