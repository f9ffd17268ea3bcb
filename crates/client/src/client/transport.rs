//! Authenticated HTTP transport shared by every service.
//!
//! Responsibilities:
//! - Hold the base URL, API key, HTTP client and optional metrics collector.
//! - Attach `x-api-key` and `Content-Type: application/json` to every request.
//! - Expose typed JSON, envelope and raw-body request helpers.
//!
//! Explicitly does NOT handle:
//! - Retries or backoff.
//! - Building query strings (see [`crate::endpoints::QueryParams`]).
//!
//! Invariants:
//! - The API key is only ever exposed when writing the request header.
//! - Paths are appended verbatim to the base URL, which never ends in `/`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use oathnet_config::constants::{API_KEY_HEADER, DEFAULT_MAX_REDIRECTS};

use crate::endpoints::{self, QueryParams, RawBody};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::Envelope;

/// HTTP transport bound to one API key and base URL.
#[derive(Debug)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    metrics: Option<MetricsCollector>,
}

impl Transport {
    pub(crate) fn new(
        base_url: String,
        api_key: SecretString,
        timeout: Duration,
        metrics: Option<MetricsCollector>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
            metrics,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn metrics(&self) -> Option<&MetricsCollector> {
        self.metrics.as_ref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header(CONTENT_TYPE, "application/json")
    }

    /// `GET path?query`, decoding the body as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryParams) -> Result<T> {
        let builder = self.request(Method::GET, path).query(query.as_slice());
        let response = endpoints::send_request(builder, path, "GET", self.metrics()).await?;
        endpoints::read_json(response, path).await
    }

    /// `GET path?query`, normalizing the body into an [`Envelope`].
    pub async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<Envelope<T>> {
        let builder = self.request(Method::GET, path).query(query.as_slice());
        let response = endpoints::send_request(builder, path, "GET", self.metrics()).await?;
        endpoints::read_envelope(response, path).await
    }

    /// `POST path` with a JSON body, decoding the response as `T`.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path).json(body);
        let response = endpoints::send_request(builder, path, "POST", self.metrics()).await?;
        endpoints::read_json(response, path).await
    }

    /// `POST path` with a JSON body, normalizing the response into an [`Envelope`].
    pub async fn post_envelope<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        let builder = self.request(Method::POST, path).json(body);
        let response = endpoints::send_request(builder, path, "POST", self.metrics()).await?;
        endpoints::read_envelope(response, path).await
    }

    /// `GET path?query`, returning the body bytes untouched.
    pub async fn get_raw(&self, path: &str, query: &QueryParams) -> Result<RawBody> {
        let builder = self.request(Method::GET, path).query(query.as_slice());
        let response = endpoints::send_request(builder, path, "GET", self.metrics()).await?;
        endpoints::read_raw(response).await
    }
}
