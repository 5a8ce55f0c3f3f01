//! Error type for the login (cookie-issuing) path.
//!
//! Only issuing a cookie can fail. Verification never errors: malformed or
//! tampered cookies degrade to "not logged in".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The session payload failed to serialize into its wire form.
    #[error("session payload failed to serialize: {0}")]
    Encode(#[from] serde_json::Error),

    /// The serialized payload does not fit the configured cookie size limit.
    #[error("cookie value exceeds max_cookie_bytes ({len} > {max})")]
    CookieTooLarge { len: usize, max: usize },
}
