//! Request extraction helpers
//!
//! Write endpoints accept either JSON or urlencoded form bodies so the same
//! routes serve API clients and plain HTML forms.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;
use crate::constants::JSON_SUFFIX;
use crate::core::Error;
use super::error::ApiError;

/// Representation requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Rendered HTML view
    Html,
    /// Raw JSON
    Json,
}

impl Format {
    /// Split a `:id` path segment into the identifier and the representation
    ///
    /// `a1b2c3.json` selects JSON, anything else HTML.
    pub fn from_path(segment: &str) -> (&str, Format) {
        match segment.strip_suffix(JSON_SUFFIX) {
            Some(id) => (id, Format::Json),
            None => (segment, Format::Html),
        }
    }

    /// Pick a representation from the `Accept` header
    pub fn from_headers(headers: &HeaderMap) -> Format {
        let wants_json = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(|accept| accept.contains("application/json") && !accept.contains("text/html"))
            .unwrap_or(false);
        if wants_json {
            Format::Json
        } else {
            Format::Html
        }
    }
}

/// Request body decoded from JSON or an urlencoded form
///
/// A request without a `Content-Type` carries no fields and decodes to
/// `T::default()`.
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        match content_type {
            None => Ok(Payload(T::default())),
            Some(ct) if ct.starts_with("application/json") => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError(Error::invalid(e.body_text())))?;
                Ok(Payload(value))
            }
            Some(_) => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError(Error::invalid(e.body_text())))?;
                Ok(Payload(value))
            }
        }
    }
}

/// Query string decoded into `T`
///
/// Malformed query strings are rejected with the same JSON error body as
/// every other client error.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError(Error::invalid(e.body_text())))?;
        Ok(QueryParams(value))
    }
}
