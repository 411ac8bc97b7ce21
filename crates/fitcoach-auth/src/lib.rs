pub mod error;
pub mod google;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use google::{GoogleTokenVerifier, IdTokenVerifier, VerifiedIdentity};
pub use password::{hash_password, verify_password};
pub use token::{inspect_claims, issue_token, verify_token, Claims, TOKEN_TTL_SECS};
