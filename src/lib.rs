//! Stateless signed-cookie login sessions for `tower`.
//!
//! This crate authenticates HTTP requests without any server-side session
//! storage. [`SessionGate::login`] issues a cookie holding the application's
//! session payload plus an HMAC-SHA256 integrity hash; on later requests the
//! gate recomputes the hash from the payload and the process-wide secret and
//! rejects anything that does not match. [`RequireLoginLayer`] packages the
//! check as a pipeline step: verified requests proceed with their payload in
//! the request extensions, everything else is redirected.
//!
//! # Security
//! Cookie contents are **integrity-protected, not encrypted**. The payload is
//! plaintext JSON that the client can read (but not alter without detection).
//! Never put anything secret in the session payload. There is no revocation
//! and no secret rotation; a cookie stays valid until its max-age elapses.

pub mod codec;
mod config;
mod error;
mod gate;
pub mod layer;
mod secret;
mod session;

pub use tower_cookies::{Cookie, Cookies, cookie::SameSite};

pub use crate::config::LoginCookieConfig;
pub use crate::error::Error;
pub use crate::gate::SessionGate;
pub use crate::layer::RequireLoginLayer;
pub use crate::secret::Secret;
pub use crate::session::{HASH_KEY, SessionData, Value};
