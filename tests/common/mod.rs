#![allow(dead_code)]

// Shared helpers for integration tests.
//
// These helpers intentionally use `tower_cookies::Cookie` parsing/encoding to match what the
// middleware emits in `Set-Cookie` and what browsers send back in `Cookie`.
use axum::{Extension, Router, body::Body, routing::get};
use http::{HeaderMap, Response, header};
use http_body_util::BodyExt as _;
use tower_cookies::CookieManagerLayer;

use tower_cookie_login::{
    Cookie, Cookies, LoginCookieConfig, RequireLoginLayer, SessionData, SessionGate, Value,
};

pub const SECRET: &str = "integration-test-secret";

pub fn make_gate(config: LoginCookieConfig) -> SessionGate {
    SessionGate::new(SECRET).with_config(config)
}

/// The fixed payload issued by the `/login` route.
pub fn login_payload() -> SessionData {
    let mut data = SessionData::new();
    data.insert("name", "martin");
    data.insert("number", 42);
    data
}

/// An app with public `/login` and `/logout` routes and a gated `/me` route.
///
/// `/me` renders the `name` field of the verified payload (or `unknown`), so
/// tests can observe both that the gate passed and what it passed through.
pub fn app(gate: SessionGate) -> Router {
    let protected = Router::new()
        .route(
            "/me",
            get(|Extension(session): Extension<SessionData>| async move {
                session
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_owned()
            }),
        )
        .route_layer(RequireLoginLayer::new(gate.clone()));

    Router::new()
        .route(
            "/login",
            get({
                let gate = gate.clone();
                move |cookies: Cookies| {
                    let gate = gate.clone();
                    async move {
                        gate.login(login_payload(), &cookies)
                            .expect("login issues a cookie");
                    }
                }
            }),
        )
        .route(
            "/logout",
            get({
                let gate = gate.clone();
                move |cookies: Cookies| {
                    let gate = gate.clone();
                    async move {
                        gate.logout(&cookies);
                    }
                }
            }),
        )
        .merge(protected)
        .layer(CookieManagerLayer::new())
}

pub async fn body_string(body: Body) -> String {
    // Collect an Axum body into a UTF-8 string for assertions.
    let bytes = body
        .collect()
        .await
        .expect("body collects successfully")
        .to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn get_login_cookie(res: &Response<Body>) -> Cookie<'static> {
    // Convenience: parse the login cookie from a response.
    get_login_cookie_from_headers(res.headers())
}

pub fn get_login_cookie_from_headers(headers: &HeaderMap) -> Cookie<'static> {
    // Parse the `Set-Cookie` header into a `Cookie` structure.
    let set_cookie = headers
        .get(header::SET_COOKIE)
        .expect("response includes set-cookie header");
    let set_cookie = set_cookie
        .to_str()
        .expect("set-cookie header is valid utf-8");
    Cookie::parse_encoded(set_cookie)
        .expect("set-cookie parses successfully")
        .into_owned()
}

pub fn cookie_header_value(cookie: &Cookie<'_>) -> String {
    // Encode a cookie for use in a `Cookie` request header.
    cookie.encoded().to_string()
}

/// Build a `Cookie` request-header value carrying an arbitrary payload, the
/// way a client hand-crafting (or tampering with) the cookie would.
pub fn forged_cookie_header(name: &str, data: &SessionData) -> String {
    let json = serde_json::to_string(data).expect("payload serializes");
    let cookie = Cookie::new(name.to_owned(), json);
    cookie.encoded().to_string()
}

/// Decode the JSON payload carried by a login cookie.
pub fn decode_payload(cookie: &Cookie<'_>) -> SessionData {
    serde_json::from_str(cookie.value()).expect("cookie payload decodes successfully")
}
