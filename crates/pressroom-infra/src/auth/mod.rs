//! Authentication implementations.

mod jwt;
mod password;
mod pin;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
pub use pin::StoredPinVerifier;
