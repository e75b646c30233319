//! In-process stand-in for the naming service.
//!
//! Serves canned answers per `(method, path)`, records every request it
//! receives and tracks how many were in flight at once.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aznamingtool_provider::client::ApiClient;
use aznamingtool_provider::config::ClientConfig;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-api-key";
pub const ADMIN_PASSWORD: &str = "test-admin-password";

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub seq: usize,
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Clone)]
struct Canned {
    status: u16,
    body: Vec<u8>,
    delay: Duration,
}

#[derive(Default)]
struct Inner {
    routes: Mutex<HashMap<(Method, String), Canned>>,
    log: Mutex<Vec<Recorded>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

pub struct StubServer {
    addr: SocketAddr,
    inner: Arc<Inner>,
}

impl StubServer {
    pub async fn start() -> Self {
        let inner = Arc::new(Inner::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&inner));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, inner }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.respond_delayed(method, path, status, body, Duration::ZERO);
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond(method, path, status, body.to_string());
    }

    pub fn respond_delayed(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: impl Into<Vec<u8>>,
        delay: Duration,
    ) {
        self.inner.routes.lock().unwrap().insert(
            (method, path.to_string()),
            Canned {
                status,
                body: body.into(),
                delay,
            },
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.log.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.inner.max_in_flight.load(Ordering::SeqCst)
    }

    /// A client for this stub with the admin password set.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(ClientConfig::new(self.url(), API_KEY).with_admin_password(ADMIN_PASSWORD))
            .unwrap()
    }

    /// Provider configuration pointing at this stub.
    pub fn provider_config(&self) -> Value {
        serde_json::json!({
            "base_url": self.url(),
            "api_key": API_KEY,
            "admin_password": ADMIN_PASSWORD,
        })
    }
}

async fn handle(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let current = inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    inner.max_in_flight.fetch_max(current, Ordering::SeqCst);

    let path = uri.path().to_string();
    {
        let mut log = inner.log.lock().unwrap();
        let seq = log.len();
        log.push(Recorded {
            seq,
            method: method.clone(),
            path: path.clone(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let canned = inner
        .routes
        .lock()
        .unwrap()
        .get(&(method.clone(), path.clone()))
        .cloned();

    let response = match canned {
        Some(canned) => {
            if !canned.delay.is_zero() {
                tokio::time::sleep(canned.delay).await;
            }
            (
                StatusCode::from_u16(canned.status).unwrap(),
                [(header::CONTENT_TYPE, "application/json")],
                canned.body,
            )
                .into_response()
        },
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            format!(r#"{{"message":"no stub for {} {}"}}"#, method, path),
        )
            .into_response(),
    };

    inner.in_flight.fetch_sub(1, Ordering::SeqCst);
    response
}
