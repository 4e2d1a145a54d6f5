//! # auth-adapters
//!
//! Argon2id implementation of `PasswordHasher` and, behind `auth-jwt`,
//! an HS256 implementation of `TokenIssuer`.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::{Argon2Hasher, PasswordError};

#[cfg(feature = "auth-jwt")]
pub use jwt::{JwtIssuer, SessionClaims, TokenError};
