//! Extractor configuration turning framework rejections into domain errors.
//!
//! Without these, malformed bodies and unknown path segments would bypass
//! the JSON error schema and reach clients as plain-text responses.

use actix_web::{HttpRequest, error::JsonPayloadError, error::PathError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected request body");
    Error::invalid_request(format!("invalid request body: {err}"))
        .with_details(json!({ "code": "invalid_body" }))
        .into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "no resource for path");
    Error::not_found(format!("no resource at {}", req.path())).into()
}

/// JSON body extractor settings: rejections become `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path extractor settings: unparsable segments become `not_found`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
