//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructor failures and extractor rejections are both turned into
//! `invalid_request` errors whose details name the offending field and a
//! stable code.

use actix_web::web;
use serde_json::json;

use crate::domain::{Error, OwnerValidationError};

/// Codes reported for malformed requests rejected before reaching a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RejectionCode {
    InvalidJson,
    InvalidQuery,
}

impl RejectionCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::InvalidQuery => "invalid_query",
        }
    }
}

fn rejection(code: RejectionCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

/// Map an owner constraint violation to a `400` error.
///
/// The message has the form `"<field>: <constraint message>"`.
pub(crate) fn owner_validation_error(err: &OwnerValidationError) -> Error {
    Error::invalid_request(format!("{}: {err}", err.field())).with_details(json!({
        "field": err.field(),
        "code": err.constraint(),
    }))
}

/// JSON extractor configuration reporting body errors as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        rejection(RejectionCode::InvalidJson, format!("invalid request body: {err}")).into()
    })
}

/// Query extractor configuration reporting parse errors as domain errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        rejection(RejectionCode::InvalidQuery, format!("invalid query string: {err}")).into()
    })
}
