//! Typed GET / POST / DELETE operations.
//!
//! Each operation resolves a named endpoint, builds the request, routes it
//! through the queue and decodes the JSON answer. All precondition checks
//! happen before anything is enqueued.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiClient, ApiResponse};
use crate::error::ApiError;

impl ApiClient {
    /// GET `operation` with path placeholders filled from `params`.
    pub async fn get<T>(&self, operation: &str, params: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.build(Method::GET, operation, params)?;
        self.submit(&request).await?.json()
    }

    /// POST `payload` as JSON to `operation`.
    ///
    /// Without a payload the request is sent with an empty body.
    pub async fn post<B, T>(&self, operation: &str, payload: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoints().resolve(operation, &[])?;
        let mut builder = self.http().post(url);
        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }
        let request = builder.build().map_err(|e| invalid_request(operation, e))?;

        self.submit(&request).await?.json()
    }

    /// DELETE `operation` with path placeholders filled from `params`.
    ///
    /// Success or failure is the primary signal; the raw response is returned
    /// for callers that want to inspect it.
    pub async fn delete(
        &self,
        operation: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        let request = self.build(Method::DELETE, operation, params)?;
        self.submit(&request).await
    }

    /// DELETE and decode the response body, if there is one.
    pub async fn delete_as<T>(
        &self,
        operation: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        self.delete(operation, params).await?.json_opt()
    }

    fn build(
        &self,
        method: Method,
        operation: &str,
        params: &[(&str, &str)],
    ) -> Result<Request, ApiError> {
        let url = self.endpoints().resolve(operation, params)?;
        self.http()
            .request(method, url)
            .build()
            .map_err(|e| invalid_request(operation, e))
    }
}

fn invalid_request(operation: &str, err: reqwest::Error) -> ApiError {
    ApiError::Precondition(format!("cannot build request for '{}': {}", operation, err))
}
