//! HTTP plumbing for the transit API.
//!
//! Everything goes through the [`HttpClient`] seam so tests can answer
//! requests in memory and wrappers like [`ApiKey`] can decorate them.

mod basic;
mod client;
pub mod auth;

pub use auth::ApiKey;
pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::LookupError;

const JSON_API: &str = "application/vnd.api+json";

/// Issues a GET for `url` and decodes the JSON body.
///
/// A non-success status is turned into a [`LookupError`] carrying the first
/// structured error detail from the body when there is one.
pub async fn fetch_json<C, T>(client: &C, url: Url) -> Result<T, LookupError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let mut req = reqwest::Request::new(reqwest::Method::GET, url);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static(JSON_API));

    let resp = client.execute(req).await?;
    let status = resp.status();
    let bytes = resp.bytes().await?;
    debug!(status = status.as_u16(), bytes = bytes.len(), "Response received");

    if !status.is_success() {
        return Err(LookupError::from_error_body(status, &bytes));
    }

    Ok(serde_json::from_slice(&bytes)?)
}
