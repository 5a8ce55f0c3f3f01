use std::net::SocketAddr;

use axum::{Extension, Router, routing::get};
use time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_cookie_login::{
    Cookies, LoginCookieConfig, RequireLoginLayer, SessionData, SessionGate, Value,
};

async fn login(Extension(gate): Extension<SessionGate>, cookies: Cookies) -> String {
    let mut data = SessionData::new();
    data.insert("user", "alice");
    data.insert("admin", true);

    match gate.login(data, &cookies) {
        Ok(signed) => format!("logged in, hash={}", signed.hash().unwrap_or("?")),
        Err(err) => format!("login failed: {err}"),
    }
}

async fn logout(Extension(gate): Extension<SessionGate>, cookies: Cookies) -> &'static str {
    gate.logout(&cookies);
    "logged out"
}

async fn admin(Extension(session): Extension<SessionData>) -> String {
    let user = session
        .get("user")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    format!("hello, {user}")
}

#[tokio::main]
async fn main() {
    let config = LoginCookieConfig::default()
        // Default: "login"
        .with_name("login")
        // Default: 3 hours
        .with_max_age(Duration::hours(3))
        // Default: "/"
        .with_unauthorized_url("/login")
        // Default: true (set to false for local HTTP development)
        .with_secure(false);
    let gate = SessionGate::new("change-me-to-a-real-secret").with_config(config);

    let protected = Router::new()
        .route("/admin", get(admin))
        .route_layer(RequireLoginLayer::new(gate.clone()));

    let app = Router::new()
        .route("/login", get(login))
        .route("/logout", get(logout))
        .merge(protected)
        .layer(CookieManagerLayer::new())
        .layer(Extension(gate));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("tcp listener binds successfully");
    let local_addr = listener.local_addr().expect("local address is available");
    println!("listening at http://{local_addr}");

    axum::serve(listener, app)
        .await
        .expect("server runs successfully");
}
