//! Shared types, error types, and wire models for Keystep

pub mod errors;
pub mod transaction;

pub use errors::{FlowError, FlowResult};
pub use transaction::{
    ApiErrorResponse, ErrorCause, FactorResult, SuccessResponse, TransactionState,
};
