//! Authentication flow state machine with single-flight polling
//!
//! A flow is a chain of immutable [`AuthStatus`] nodes, each representing
//! one step of a multi-factor login/recovery attempt. The [`ResponseHandler`]
//! is the single chokepoint that turns a server response into exactly one
//! of: an error surfaced, a poll rescheduled, or the next node handed to the
//! caller through its [`FlowDelegate`].
//!
//! # Usage Example
//! ```no_run
//! use std::sync::Arc;
//! use ks_api::{HttpAuthApi, PrimaryAuthRequest};
//! use ks_flow::{authenticate, FlowConfig, FlowDelegate};
//!
//! # async fn run(delegate: Arc<dyn FlowDelegate>) {
//! let api = HttpAuthApi::new("https://acme.example.test".parse().unwrap());
//! let config = FlowConfig::new("https://acme.example.test".parse().unwrap(), Arc::new(api));
//! let request = PrimaryAuthRequest::new("user@example.test", "correct horse");
//! authenticate(&config, request, &delegate).await;
//! // delegate receives the resulting status, errors, and factor updates
//! # }
//! ```

mod config;
mod delegate;
mod flow;
mod handler;
mod status;

pub use config::FlowConfig;
pub use delegate::FlowDelegate;
pub use flow::{authenticate, resume};
pub use handler::ResponseHandler;
pub use status::AuthStatus;
