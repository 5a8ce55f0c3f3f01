use tower_cookies::{Cookie, Cookies};

use crate::codec;
use crate::config::LoginCookieConfig;
use crate::error::Error;
use crate::secret::Secret;
use crate::session::{HASH_KEY, SessionData};

/// Issues, clears, and verifies login cookies against a single secret.
///
/// The gate is stateless: every check re-derives trust from the request's
/// cookie value and the secret alone, so a clone can serve any number of
/// concurrent requests without coordination.
#[derive(Debug, Clone)]
pub struct SessionGate {
    secret: Secret,
    config: LoginCookieConfig,
}

impl SessionGate {
    /// Creates a gate with the default [`LoginCookieConfig`].
    #[must_use]
    pub fn new(secret: impl Into<Secret>) -> Self {
        Self {
            secret: secret.into(),
            config: LoginCookieConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: LoginCookieConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &LoginCookieConfig {
        &self.config
    }

    /// Signs `data` and queues the login cookie on `cookies`.
    ///
    /// Returns the signed payload (the input plus its `hash` entry); the
    /// caller's value is consumed rather than mutated through a reference.
    /// The cookie value is the payload's JSON form, and the cookie is
    /// `HttpOnly` with the configured max-age.
    pub fn login(&self, mut data: SessionData, cookies: &Cookies) -> Result<SessionData, Error> {
        let hash = codec::sign_payload(&data, &self.secret);
        data.insert(HASH_KEY, hash);

        let value = serde_json::to_string(&data)?;
        if value.len() > self.config.max_cookie_bytes {
            return Err(Error::CookieTooLarge {
                len: value.len(),
                max: self.config.max_cookie_bytes,
            });
        }

        cookies.add(self.config.build_cookie(value));
        Ok(data)
    }

    /// Queues removal of the login cookie. No other side effects.
    pub fn logout(&self, cookies: &Cookies) {
        let mut cookie = Cookie::new(self.config.name.clone(), "");
        self.config.apply_removal_attributes(&mut cookie);
        cookies.remove(cookie);
    }

    /// The raw (unverified) payload from the request's login cookie.
    ///
    /// An absent cookie or malformed JSON is `None`, never an error.
    #[must_use]
    pub fn extract_raw(&self, cookies: &Cookies) -> Option<SessionData> {
        let cookie = cookies.get(&self.config.name)?;
        match serde_json::from_str(cookie.value()) {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::debug!(err = %err, "login cookie failed to parse");
                None
            }
        }
    }

    /// Whether the request carries a login cookie that verifies.
    #[must_use]
    pub fn is_logged_in(&self, cookies: &Cookies) -> bool {
        self.extract_raw(cookies)
            .is_some_and(|data| codec::verify(&data, &self.secret))
    }

    /// The verified payload, or `None` if the cookie is absent, malformed,
    /// or fails verification.
    ///
    /// Re-parses on every call; the returned payload retains its `hash`
    /// entry, so re-serializing it reproduces the wire value exactly.
    #[must_use]
    pub fn session(&self, cookies: &Cookies) -> Option<SessionData> {
        self.extract_raw(cookies)
            .filter(|data| codec::verify(data, &self.secret))
    }
}
