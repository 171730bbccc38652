//! Stylesheet response mapping
//!
//! Every answer from the stylesheet endpoint is CSS: the font payload on
//! success, a single comment carrying the diagnostic otherwise. CORS headers
//! are attached to every variant so browsers surface the diagnostic instead of
//! a generic CORS failure.

use axum::{
    http::{
        header::{self, HeaderMap, HeaderValue},
        StatusCode,
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::error;

use crate::domain::{DomainError, LicenseOutcome};

pub const CSS_CONTENT_TYPE: &str = "text/css; charset=utf-8";

const INTERNAL_ERROR_MESSAGE: &str = "Internal error while validating the license. Please retry later.";
const PREFLIGHT_METHODS: &str = "GET, HEAD, OPTIONS";

/// Caching directive attached to a stylesheet response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDirective {
    NoStore,
    Public { max_age: u64 },
}

impl CacheDirective {
    fn header_value(self) -> HeaderValue {
        match self {
            Self::NoStore => HeaderValue::from_static("no-store"),
            Self::Public { max_age } => {
                HeaderValue::from_str(&format!("public, max-age={}", max_age))
                    .unwrap_or_else(|_| HeaderValue::from_static("no-store"))
            }
        }
    }
}

/// HTTP rendering of a license decision
#[derive(Debug, Clone)]
pub struct StylesheetResponse {
    pub status: StatusCode,
    pub body: Bytes,
    pub cache: CacheDirective,
    pub etag: Option<String>,
}

impl StylesheetResponse {
    pub fn from_outcome(outcome: &LicenseOutcome, cache_max_age: u64) -> Self {
        match outcome {
            LicenseOutcome::Success(stylesheet) => Self {
                status: StatusCode::OK,
                body: stylesheet.content().clone(),
                cache: CacheDirective::Public {
                    max_age: cache_max_age,
                },
                etag: Some(stylesheet.etag().to_string()),
            },
            LicenseOutcome::MissingKey => Self::diagnostic(StatusCode::UNAUTHORIZED, &outcome.message()),
            LicenseOutcome::UnknownResource { .. } => {
                Self::diagnostic(StatusCode::NOT_FOUND, &outcome.message())
            }
            LicenseOutcome::InvalidKey
            | LicenseOutcome::DisabledKey
            | LicenseOutcome::NotEntitled { .. } => {
                Self::diagnostic(StatusCode::FORBIDDEN, &outcome.message())
            }
        }
    }

    /// Generic 500; the cause stays in the logs
    pub fn internal_failure() -> Self {
        Self::diagnostic(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    fn diagnostic(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: Bytes::from(css_comment(message)),
            cache: CacheDirective::NoStore,
            etag: None,
        }
    }

    /// Turn a success into 304 when the client already holds the payload
    pub fn revalidate(mut self, if_none_match: Option<&HeaderValue>) -> Self {
        let (Some(etag), Some(candidates)) = (self.etag.as_deref(), if_none_match) else {
            return self;
        };

        let Ok(candidates) = candidates.to_str() else {
            return self;
        };

        if etag_matches(etag, candidates) {
            self.status = StatusCode::NOT_MODIFIED;
            self.body = Bytes::new();
        }

        self
    }
}

impl From<DomainError> for StylesheetResponse {
    fn from(err: DomainError) -> Self {
        error!(error = %err, "License check failed");
        Self::internal_failure()
    }
}

impl IntoResponse for StylesheetResponse {
    fn into_response(self) -> Response {
        let mut headers = cors_headers();
        headers.insert(header::CACHE_CONTROL, self.cache.header_value());

        if let Some(etag) = self.etag.as_deref().and_then(|e| HeaderValue::from_str(e).ok()) {
            headers.insert(header::ETAG, etag);
        }

        (self.status, headers, self.body).into_response()
    }
}

/// Bodyless answer to a CORS preflight
pub fn preflight_response() -> Response {
    let mut headers = cors_headers();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(PREFLIGHT_METHODS),
    );
    headers.insert(header::CACHE_CONTROL, CacheDirective::NoStore.header_value());

    (StatusCode::NO_CONTENT, headers).into_response()
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CSS_CONTENT_TYPE));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers
}

fn css_comment(message: &str) -> String {
    format!("/* {} */\n", message.replace("*/", "* /"))
}

fn etag_matches(etag: &str, candidates: &str) -> bool {
    candidates.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.trim_start_matches("W/") == etag
    })
}
