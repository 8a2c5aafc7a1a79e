//! Backend Commands
//!
//! Frontend bindings to the REST API, organized by domain. Every call goes
//! through the request core below, which:
//! - prefixes `config::API_BASE`
//! - attaches `Authorization: Bearer <token>` when a token is stored
//! - maps non-2xx responses to [`ApiError`]
//! - on 401 for a request that carried a token, expires the session

mod artwork;
mod auth;
mod blog;
mod profile;
mod upload;

use gloo_net::http::{Request, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::api_url;
use crate::error::{ApiError, ErrorBody};
use crate::session;

// Re-export all public items
pub use artwork::*;
pub use auth::*;
pub use blog::*;
pub use profile::*;
pub use upload::*;

// ========================
// Query Strings
// ========================

/// Everything except RFC 3986 unreserved characters
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Ordered query parameters; values are percent-encoded on render
#[derive(Debug, Default)]
pub(crate) struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Skips `None` and blank values
    pub fn push_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value.map(|v| v.to_string()).filter(|v| !v.trim().is_empty()) {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    pub fn to_path(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let query = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, COMPONENT_SET)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{query}")
    }
}

/// Percent-encode a single path segment
pub(crate) fn segment(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_SET).to_string()
}

// ========================
// Request Core
// ========================

#[derive(Clone, Copy, Debug)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

fn builder(verb: Verb, path: &str) -> (RequestBuilder, bool) {
    let url = api_url(path);
    let builder = match verb {
        Verb::Get => Request::get(&url),
        Verb::Post => Request::post(&url),
        Verb::Put => Request::put(&url),
        Verb::Delete => Request::delete(&url),
    };
    match session::token() {
        Some(token) => (builder.header("Authorization", &format!("Bearer {token}")), true),
        None => (builder, false),
    }
}

fn build_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

async fn dispatch(request: Request, authed: bool) -> Result<Response, ApiError> {
    let url = request.url();
    let resp = request.send().await.map_err(|e| {
        log::warn!("[api] {url} failed: {e}");
        ApiError::Network(e.to_string())
    })?;
    if resp.ok() {
        return Ok(resp);
    }

    let status = resp.status();
    let message = resp.json::<ErrorBody>().await.ok().and_then(ErrorBody::into_message);
    let err = ApiError::from_status(status, message);
    log::debug!("[api] {url} -> {status}");
    if err == ApiError::Unauthorized && authed {
        session::expire();
    }
    Err(err)
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let text = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
    decode_text(&text)
}

fn decode_text<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_json<B, T>(verb: Verb, path: &str, body: Option<&B>) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let (builder, authed) = builder(verb, path);
    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(build_error)?;
    decode(dispatch(request, authed).await?).await
}

pub(crate) async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send_json::<(), T>(Verb::Get, path, None).await
}

pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    send_json(Verb::Post, path, Some(body)).await
}

pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    send_json(Verb::Put, path, Some(body)).await
}

/// Request whose response body is ignored
async fn send_unit(verb: Verb, path: &str) -> Result<(), ApiError> {
    let (builder, authed) = builder(verb, path);
    let request = builder.build().map_err(build_error)?;
    dispatch(request, authed).await.map(|_| ())
}

pub(crate) async fn post_empty(path: &str) -> Result<(), ApiError> {
    send_unit(Verb::Post, path).await
}

/// JSON POST for endpoints that may answer 200/201/204 with any body or none
pub(crate) async fn post_json_unit<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<(), ApiError> {
    let (builder, authed) = builder(Verb::Post, path);
    let request = builder.json(body).map_err(build_error)?;
    dispatch(request, authed).await.map(|_| ())
}

pub(crate) async fn delete(path: &str) -> Result<(), ApiError> {
    send_unit(Verb::Delete, path).await
}

/// Multipart POST with a single `file` field
pub(crate) async fn post_file<T: DeserializeOwned>(path: &str, file: &web_sys::File) -> Result<T, ApiError> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::Network("FormData unavailable".into()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Network("could not attach file".into()))?;
    let (builder, authed) = builder(Verb::Post, path);
    let request = builder.body(form).map_err(build_error)?;
    decode(dispatch(request, authed).await?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encodes_and_skips_blanks() {
        let path = Query::new()
            .push("user", "mina")
            .push_opt("search", Some("oil & water"))
            .push_opt("type", None::<&str>)
            .push_opt("status", Some("  "))
            .push("page", 0)
            .to_path("/api/blog/posts");
        assert_eq!(path, "/api/blog/posts?user=mina&search=oil%20%26%20water&page=0");
    }

    #[test]
    fn test_decode_text() {
        let user: serde_json::Value = decode_text(r#"{"slug":"mina"}"#).unwrap();
        assert_eq!(user["slug"], "mina");
        // a bodiless success cannot be decoded; such endpoints use `post_json_unit`
        assert!(matches!(decode_text::<serde_json::Value>(""), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_query_without_pairs() {
        assert_eq!(Query::new().to_path("/api/artworks"), "/api/artworks");
    }

    #[test]
    fn test_segment_encodes_reserved() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
