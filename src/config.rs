use std::borrow::Cow;

use time::Duration;
use tower_cookies::Cookie;

use crate::SameSite;

/// Cookie and denial settings for a [`SessionGate`](crate::SessionGate).
///
/// Constructed once and handed to the gate; there is no mutation after that.
/// Issued cookies are always `HttpOnly`; that attribute is not configurable.
#[derive(Debug, Clone)]
pub struct LoginCookieConfig {
    pub(crate) name: Cow<'static, str>,
    pub(crate) max_age: Duration,
    pub(crate) unauthorized_url: Cow<'static, str>,
    pub(crate) same_site: SameSite,
    pub(crate) secure: bool,
    pub(crate) path: Cow<'static, str>,
    pub(crate) domain: Option<Cow<'static, str>>,
    pub(crate) max_cookie_bytes: usize,
}

impl Default for LoginCookieConfig {
    fn default() -> Self {
        Self {
            name: "login".into(),
            max_age: Duration::hours(3),
            unauthorized_url: "/".into(),
            same_site: SameSite::Strict,
            secure: true,
            path: "/".into(),
            domain: None,
            max_cookie_bytes: 4096,
        }
    }
}

impl LoginCookieConfig {
    #[must_use]
    pub fn with_name<N: Into<Cow<'static, str>>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Where the gate redirects requests that fail verification.
    #[must_use]
    pub fn with_unauthorized_url<U: Into<Cow<'static, str>>>(mut self, url: U) -> Self {
        self.unauthorized_url = url.into();
        self
    }

    #[must_use]
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_path<P: Into<Cow<'static, str>>>(mut self, path: P) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_domain<D: Into<Cow<'static, str>>>(mut self, domain: D) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn without_domain(mut self) -> Self {
        self.domain = None;
        self
    }

    #[must_use]
    pub fn with_max_cookie_bytes(mut self, max_cookie_bytes: usize) -> Self {
        self.max_cookie_bytes = max_cookie_bytes;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn unauthorized_url(&self) -> &str {
        &self.unauthorized_url
    }

    pub(crate) fn build_cookie(&self, value: String) -> Cookie<'static> {
        let mut cookie_builder = Cookie::build((self.name.clone(), value))
            .http_only(true)
            .same_site(self.same_site)
            .secure(self.secure)
            .path(self.path.clone())
            .max_age(self.max_age);

        if let Some(domain) = self.domain.clone() {
            cookie_builder = cookie_builder.domain(domain);
        }

        cookie_builder.build()
    }

    // Removal cookies must match the issued path/domain or clients keep the
    // original cookie alongside the removal.
    pub(crate) fn apply_removal_attributes(&self, cookie: &mut Cookie<'static>) {
        cookie.set_path(self.path.clone());
        if let Some(domain) = self.domain.clone() {
            cookie.set_domain(domain);
        }
    }
}
