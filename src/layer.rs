//! The request-pipeline gate: a `tower` layer that only lets verified
//! requests through.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use http::{Request, Response, StatusCode, header};
use tower_cookies::CookieManager;
use tower_layer::Layer;
use tower_service::Service;

use crate::gate::SessionGate;

/// Layers [`RequireLogin`] around a service, wrapped in
/// [`CookieManager`] so the gate always finds a cookie jar on the request.
#[derive(Debug, Clone)]
pub struct RequireLoginLayer {
    gate: SessionGate,
}

impl RequireLoginLayer {
    #[must_use]
    pub fn new(gate: SessionGate) -> Self {
        Self { gate }
    }
}

impl<S> Layer<S> for RequireLoginLayer {
    type Service = CookieManager<RequireLogin<S>>;

    fn layer(&self, inner: S) -> Self::Service {
        CookieManager::new(RequireLogin {
            inner,
            gate: self.gate.clone(),
        })
    }
}

/// Middleware that verifies the login cookie before calling the inner
/// service.
///
/// A verified request proceeds with its [`SessionData`](crate::SessionData)
/// inserted into the request extensions; anything else is answered with a
/// redirect to the configured unauthorized URL. Exactly one of the two
/// happens per call.
#[derive(Debug, Clone)]
pub struct RequireLogin<S> {
    inner: S,
    gate: SessionGate,
}

impl<ReqBody, ResBody, S> Service<Request<ReqBody>> for RequireLogin<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Default + Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let gate = self.gate.clone();

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let cookies = match req.extensions().get::<tower_cookies::Cookies>().cloned() {
                Some(cookies) => cookies,
                None => {
                    let mut res = Response::default();
                    *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                    return Ok(res);
                }
            };

            let session = match gate.session(&cookies) {
                Some(session) => session,
                None => {
                    tracing::debug!("login cookie missing or failed verification, redirecting");
                    return Ok(deny(gate.config().unauthorized_url()));
                }
            };

            req.extensions_mut().insert(session);
            inner.call(req).await
        })
    }
}

fn deny<ResBody: Default>(url: &str) -> Response<ResBody> {
    let mut res = Response::default();

    match header::HeaderValue::from_str(url) {
        Ok(location) => {
            *res.status_mut() = StatusCode::FOUND;
            res.headers_mut().insert(header::LOCATION, location);
        }
        Err(_) => {
            tracing::error!(url, "unauthorized redirect target is not a valid header value");
            *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        }
    }

    res
}
