//! `pedidos-auth` — caller authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: claims are a
//! transport-agnostic model, and signature verification lives behind the
//! [`JwtValidator`] trait.

pub mod claims;
pub mod principal;
pub mod validator;

pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use principal::PrincipalId;
pub use validator::{Hs256JwtValidator, JwtValidator, TokenError};
