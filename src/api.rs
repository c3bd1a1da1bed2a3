//! Synchronous client for a **PxWeb v0 table endpoint** (Statistics Norway by default).
//!
//! Two calls are exposed, both against `<base_url>/<table-id>`:
//! - `fetch_metadata`: `GET`, returns the table's variables.
//! - `fetch_data`: `POST` a query, returns the result as JSON-stat.
//!
//! ### Notes
//! - No retries. A failed request surfaces as `ApiError::Http` carrying the
//!   status and the raw body.
//! - A `403` from the data endpoint usually means the selection is too large;
//!   it is reported as `DataOutcome::Forbidden` rather than an error.
//!
//! Typical usage:
//! ```no_run
//! # use ssb_repl::{Client, query};
//! let client = Client::new("https://data.ssb.no/api/v0/no/table")?;
//! let meta = client.fetch_metadata("07459")?;
//! let vars = meta.variables().unwrap_or_default();
//! let q = query::query_from_variables(vars, Some(2), false);
//! let outcome = client.fetch_data("07459", &q)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::error::ApiError;
use crate::models::{Dataset, Metadata, Query};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::{Host, Url};

/// Sent as `User-Agent` on every request.
pub const USER_AGENT: &str = "ssb-repl";

// Allow -, _, . unescaped in table ids
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Result of a data request that got an answer the caller can act on.
#[derive(Debug, Clone, PartialEq)]
pub enum DataOutcome {
    Dataset(Dataset),
    /// The endpoint refused the query (HTTP 403); carries the error message.
    Forbidden(String),
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let mut builder = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(USER_AGENT);
        // Proxies never apply to a local mirror.
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(ApiError::Client)?;
        Ok(Self { base_url, http })
    }

    /// URL of the table endpoint for `table_id`.
    ///
    /// `/` separates path segments so nested ids (`be/be01`) address folders;
    /// each segment is percent-encoded on its own.
    pub fn table_url(&self, table_id: &str) -> String {
        let path = table_id
            .trim()
            .split('/')
            .map(|seg| percent_encoding::utf8_percent_encode(seg, SAFE).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// `GET` the table metadata.
    pub fn fetch_metadata(&self, table_id: &str) -> Result<Metadata, ApiError> {
        let url = self.table_url(table_id);
        debug!("GET {}", url);
        let req = self.http.get(&url).header(ACCEPT, "application/json");
        self.send_json("GET", &url, table_id, req)
    }

    /// `POST` the query and return the JSON-stat result.
    ///
    /// A `403` is returned as `Ok(DataOutcome::Forbidden(..))`; any other
    /// failure is an `Err` carrying the status, when there was one.
    pub fn fetch_data(&self, table_id: &str, query: &Query) -> Result<DataOutcome, ApiError> {
        let url = self.table_url(table_id);
        let body = serde_json::to_string_pretty(query)?;
        debug!("POST {}", url);
        debug!("{}", body);
        let req = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        match self.send_json::<Dataset>("POST", &url, table_id, req) {
            Ok(ds) => Ok(DataOutcome::Dataset(ds)),
            Err(e) if e.is_forbidden() => Ok(DataOutcome::Forbidden(e.to_string())),
            Err(e) => Err(e),
        }
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: &str,
        table_id: &str,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = req.send().map_err(|source| ApiError::Transport {
            method,
            url: url.to_string(),
            source,
        })?;
        if !resp.status().is_success() {
            return Err(http_error(method, table_id, resp));
        }
        resp.json().map_err(|source| ApiError::Decode {
            method,
            url: url.to_string(),
            source,
        })
    }
}

fn is_loopback(url: &str) -> bool {
    let Ok(url) = Url::parse(url) else {
        return false;
    };
    match url.host() {
        Some(Host::Domain(d)) => d.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

/// Turn a non-success response into `ApiError::Http`, keeping its body.
fn http_error(method: &'static str, table_id: &str, resp: Response) -> ApiError {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().unwrap_or_default();
    debug!("{}", body);
    ApiError::Http {
        method,
        url,
        table: table_id.to_string(),
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        body,
    }
}
