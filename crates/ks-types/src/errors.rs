//! Error types and conversions

use thiserror::Error;

use crate::transaction::{ApiErrorResponse, SuccessResponse};

#[derive(Error, Debug)]
pub enum FlowError {
    /// The response carries no recognizable status field, so no state can be
    /// constructed from it.
    #[error("Response carries no transaction status")]
    InvalidResponse,

    /// The status field is present but names a value outside the closed
    /// transition table. The full model is kept so callers can inspect what
    /// the server actually sent.
    #[error("Unknown transaction status: {}", .0.status.as_deref().unwrap_or("<none>"))]
    UnknownStatus(Box<SuccessResponse>),

    /// The status field names a value that is illegal as a transition target.
    #[error("Illegal status transition: {0}")]
    WrongStatus(String),

    /// The server rejected the request with a structured error body.
    #[error("Server responded with error: {0}")]
    Server(ApiErrorResponse),

    /// Opaque transport failure, surfaced as-is without reinterpretation.
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type FlowResult<T> = Result<T, FlowError>;

impl From<FlowError> for String {
    fn from(err: FlowError) -> String {
        err.to_string()
    }
}
