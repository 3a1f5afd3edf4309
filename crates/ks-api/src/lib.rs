//! Transport boundary for Keystep
//!
//! The flow core never talks HTTP directly — it goes through the [`AuthApi`]
//! trait, consumed as `Arc<dyn AuthApi>`. [`HttpAuthApi`] is the production
//! implementation; [`MockAuthApi`] serves canned results in tests.

mod client;
mod http;
mod mock;

pub use client::{ApiResult, AuthApi, AuthRequestOptions, PrimaryAuthRequest};
pub use http::HttpAuthApi;
pub use mock::MockAuthApi;
