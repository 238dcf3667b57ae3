//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope; writes answer with a
//! `{ "message": ... }` acknowledgement, optionally carrying the affected row.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ... }` acknowledgement for writes that return no row.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "message": ..., "data": T }` acknowledgement for writes that return a row.
#[derive(Debug, Serialize)]
pub struct MessageDataResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}
