//! Serialized request queue.
//!
//! Every outbound call goes through a bounded FIFO drained by a single worker
//! task. The worker owns the transport, attaches the authentication headers,
//! executes one request at a time and hands the outcome back through a
//! one-shot reply channel private to the submitting caller.
//!
//! ```text
//!  caller A ─┐                    ┌─ reply A
//!  caller B ─┼─▶ [ queue (100) ] ─▶ worker ─▶ naming service
//!  caller C ─┘                    └─ reply C
//! ```
//!
//! Requests are executed strictly in enqueue order. A full queue makes
//! `enqueue` wait for space. A failed request is reported to its own caller
//! only; the worker moves on to the next entry.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use crate::error::ApiError;

/// Maximum number of pending entries before `enqueue` applies backpressure.
pub const QUEUE_CAPACITY: usize = 100;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "APIKey";
/// Header carrying the admin password.
pub const ADMIN_PASSWORD_HEADER: &str = "AdminPassword";

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(ApiError::Decode)
    }

    /// Decode the body as JSON, treating an empty body as `None`.
    pub fn json_opt<T: DeserializeOwned>(&self) -> Result<Option<T>, ApiError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        self.json().map(Some)
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Credentials attached by the worker to every request.
#[derive(Clone)]
pub(crate) struct AuthHeaders {
    api_key: HeaderValue,
    admin_password: Option<HeaderValue>,
}

impl AuthHeaders {
    pub(crate) fn new(api_key: &str, admin_password: Option<&str>) -> Result<Self, ApiError> {
        let api_key = secret_header(API_KEY_HEADER, api_key)?;
        let admin_password = admin_password
            .filter(|p| !p.is_empty())
            .map(|p| secret_header(ADMIN_PASSWORD_HEADER, p))
            .transpose()?;
        Ok(Self {
            api_key,
            admin_password,
        })
    }

    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(API_KEY_HEADER, self.api_key.clone());
        if let Some(password) = &self.admin_password {
            headers.insert(ADMIN_PASSWORD_HEADER, password.clone());
        }
    }
}

fn secret_header(name: &str, value: &str) -> Result<HeaderValue, ApiError> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        ApiError::Configuration(format!("{} contains characters not allowed in a header", name))
    })?;
    header.set_sensitive(true);
    Ok(header)
}

type Reply = Result<ApiResponse, ApiError>;

struct QueuedRequest {
    request: Request,
    reply: oneshot::Sender<Reply>,
}

/// Handle to the queue. Clones share the same worker.
#[derive(Clone)]
pub struct RequestQueue {
    sender: mpsc::Sender<QueuedRequest>,
}

impl RequestQueue {
    /// Start the worker on the current tokio runtime.
    ///
    /// The worker stops once every handle has been dropped and the queue
    /// has drained.
    pub(crate) fn spawn(
        runtime: &tokio::runtime::Handle,
        http: Client,
        auth: AuthHeaders,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
        runtime.spawn(run_worker(http, auth, receiver));
        Self { sender }
    }

    /// Copy `request` into the queue and return a handle to its reply.
    ///
    /// Waits while the queue is full. The caller keeps its own request, so it
    /// may reuse it as a template while the worker reads the copy.
    pub async fn enqueue(&self, request: &Request) -> Result<PendingReply, ApiError> {
        let request = request.try_clone().ok_or_else(|| {
            ApiError::Precondition("request body cannot be copied into the queue".to_string())
        })?;

        let (reply, receiver) = oneshot::channel();
        self.sender
            .send(QueuedRequest { request, reply })
            .await
            .map_err(|_| ApiError::QueueClosed)?;

        Ok(PendingReply { receiver })
    }

    /// Enqueue `request` and wait for the worker to execute it.
    pub async fn submit(&self, request: &Request) -> Result<ApiResponse, ApiError> {
        self.enqueue(request).await?.wait().await
    }

    /// Number of free slots left in the queue.
    pub fn available(&self) -> usize {
        self.sender.capacity()
    }
}

/// The reply side of a queued request.
#[derive(Debug)]
#[must_use = "the request result is only observable through `wait`"]
pub struct PendingReply {
    receiver: oneshot::Receiver<Reply>,
}

impl PendingReply {
    /// Wait for the worker to deliver the result.
    pub async fn wait(self) -> Result<ApiResponse, ApiError> {
        self.receiver.await.map_err(|_| ApiError::QueueClosed)?
    }
}

async fn run_worker(http: Client, auth: AuthHeaders, mut receiver: mpsc::Receiver<QueuedRequest>) {
    while let Some(QueuedRequest { request, reply }) = receiver.recv().await {
        let outcome = execute(&http, &auth, request).await;
        // The caller may have stopped waiting; its result is simply dropped.
        let _ = reply.send(outcome);
    }
    trace!("request queue drained, worker exiting");
}

async fn execute(http: &Client, auth: &AuthHeaders, mut request: Request) -> Reply {
    auth.apply(request.headers_mut());

    let method = request.method().clone();
    let url = request.url().clone();
    debug!(%method, %url, "dispatching request");

    let response = http
        .execute(request)
        .await
        .map_err(|e| ApiError::transport("failed to execute request", e))?;

    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::transport("failed to read response body", e))?
        .to_vec();
    debug!(%method, %url, status, bytes = body.len(), "request completed");

    if status >= 400 {
        return Err(ApiError::Status { status, body });
    }

    Ok(ApiResponse {
        status,
        headers,
        body,
    })
}
