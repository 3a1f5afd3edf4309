//! Wire-level models for the authentication transaction API
//!
//! The server reports the state of an in-progress transaction as an
//! UPPER_SNAKE string plus an optional factor result. The raw status string
//! is kept on the model so an out-of-table value can be surfaced verbatim;
//! mapping raw -> [`TransactionState`] happens only in the flow dispatch.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical states of an authentication transaction.
///
/// Closed enumeration: exactly one state is active at a time, and it is
/// never inferred — always set by the constructing logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionState {
    #[serde(rename = "UNAUTHENTICATED")]
    Unauthenticated,
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "PASSWORD_WARN")]
    PasswordWarning,
    #[serde(rename = "PASSWORD_EXPIRED")]
    PasswordExpired,
    #[serde(rename = "PASSWORD_RESET")]
    PasswordReset,
    #[serde(rename = "MFA_ENROLL")]
    FactorEnroll,
    #[serde(rename = "MFA_ENROLL_ACTIVATE")]
    FactorEnrollActivate,
    #[serde(rename = "MFA_REQUIRED")]
    FactorRequired,
    #[serde(rename = "MFA_CHALLENGE")]
    FactorChallenge,
    #[serde(rename = "LOCKED_OUT")]
    LockedOut,
    #[serde(rename = "RECOVERY")]
    Recovery,
    #[serde(rename = "RECOVERY_CHALLENGE")]
    RecoveryChallenge,
}

impl TransactionState {
    /// Map a raw wire status string onto the closed enumeration.
    ///
    /// Returns `None` for values outside the table so the caller can decide
    /// how to surface them (the flow dispatch turns that into
    /// `FlowError::UnknownStatus`).
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "UNAUTHENTICATED" => Some(Self::Unauthenticated),
            "SUCCESS" => Some(Self::Success),
            "PASSWORD_WARN" => Some(Self::PasswordWarning),
            "PASSWORD_EXPIRED" => Some(Self::PasswordExpired),
            "PASSWORD_RESET" => Some(Self::PasswordReset),
            "MFA_ENROLL" => Some(Self::FactorEnroll),
            "MFA_ENROLL_ACTIVATE" => Some(Self::FactorEnrollActivate),
            "MFA_REQUIRED" => Some(Self::FactorRequired),
            "MFA_CHALLENGE" => Some(Self::FactorChallenge),
            "LOCKED_OUT" => Some(Self::LockedOut),
            "RECOVERY" => Some(Self::Recovery),
            "RECOVERY_CHALLENGE" => Some(Self::RecoveryChallenge),
            _ => None,
        }
    }

    /// The wire representation of this state.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Success => "SUCCESS",
            Self::PasswordWarning => "PASSWORD_WARN",
            Self::PasswordExpired => "PASSWORD_EXPIRED",
            Self::PasswordReset => "PASSWORD_RESET",
            Self::FactorEnroll => "MFA_ENROLL",
            Self::FactorEnrollActivate => "MFA_ENROLL_ACTIVATE",
            Self::FactorRequired => "MFA_REQUIRED",
            Self::FactorChallenge => "MFA_CHALLENGE",
            Self::LockedOut => "LOCKED_OUT",
            Self::Recovery => "RECOVERY",
            Self::RecoveryChallenge => "RECOVERY_CHALLENGE",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Outcome of a verification factor that is in flight.
///
/// Consumed once per response, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorResult {
    Waiting,
    Success,
    Rejected,
    Timeout,
    TimeWindowExceeded,
    PasscodeReplayed,
    Cancelled,
    Error,
}

impl FactorResult {
    /// True while the server is still waiting for the factor to complete
    /// (e.g. a push notification not yet acknowledged).
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::Waiting)
    }
}

/// Decoded body of a successful transaction API exchange.
///
/// Status-specific payloads (enrolled factors, policy details, user profile)
/// live under `embedded`/`links` and are consumed outside the flow core, so
/// they stay opaque here. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuccessResponse {
    /// Raw wire status. Kept as a string so out-of-table values survive
    /// decoding and can be reported back verbatim.
    pub status: Option<String>,

    /// Opaque handle for the in-progress transaction.
    pub state_token: Option<String>,

    /// Proof of completed authentication, present on SUCCESS responses.
    pub session_token: Option<String>,

    /// When the state token expires.
    pub expires_at: Option<DateTime<Utc>>,

    /// Opaque relay state echoed back by the server.
    pub relay_state: Option<String>,

    /// Outcome of an in-flight verification factor, if any.
    pub factor_result: Option<FactorResult>,

    /// Status-specific embedded resources, opaque to the flow core.
    #[serde(rename = "_embedded")]
    pub embedded: Option<serde_json::Value>,

    /// HAL-style links (next, cancel, resend, ...), opaque to the flow core.
    #[serde(rename = "_links")]
    pub links: Option<serde_json::Value>,
}

impl SuccessResponse {
    /// The transaction state this response reports, if the raw status maps
    /// into the closed table.
    pub fn transaction_state(&self) -> Option<TransactionState> {
        self.status.as_deref().and_then(TransactionState::from_wire)
    }
}

/// Structured error body returned by the server on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiErrorResponse {
    pub error_code: Option<String>,
    pub error_summary: Option<String>,
    pub error_link: Option<String>,
    pub error_id: Option<String>,
    pub error_causes: Vec<ErrorCause>,
}

/// One entry of an error response's cause list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorCause {
    pub error_summary: Option<String>,
}

impl fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.error_code.as_deref().unwrap_or("<no code>"),
            self.error_summary.as_deref().unwrap_or("<no summary>")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_roundtrip() {
        let states = [
            TransactionState::Unauthenticated,
            TransactionState::Success,
            TransactionState::PasswordWarning,
            TransactionState::PasswordExpired,
            TransactionState::PasswordReset,
            TransactionState::FactorEnroll,
            TransactionState::FactorEnrollActivate,
            TransactionState::FactorRequired,
            TransactionState::FactorChallenge,
            TransactionState::LockedOut,
            TransactionState::Recovery,
            TransactionState::RecoveryChallenge,
        ];

        for state in states {
            assert_eq!(TransactionState::from_wire(state.as_wire()), Some(state));
        }
    }

    #[test]
    fn test_state_from_unknown_wire_value() {
        assert_eq!(TransactionState::from_wire("MFA_PARTIAL"), None);
        assert_eq!(TransactionState::from_wire(""), None);
        // Wire values are case-sensitive
        assert_eq!(TransactionState::from_wire("success"), None);
    }

    #[test]
    fn test_decode_challenge_response() {
        let json = r#"{
            "stateToken": "007ucIX7PATyn94hsHfOLVaXAmOBkKHWnOOLG43bsb",
            "expiresAt": "2015-11-03T10:15:57.000Z",
            "status": "MFA_CHALLENGE",
            "factorResult": "WAITING",
            "_embedded": { "user": { "id": "00ub0oNGTSWTBKOLGLNR" } },
            "_links": { "cancel": { "href": "https://example.test/api/v1/authn/cancel" } }
        }"#;

        let response: SuccessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status.as_deref(), Some("MFA_CHALLENGE"));
        assert_eq!(
            response.transaction_state(),
            Some(TransactionState::FactorChallenge)
        );
        assert_eq!(response.factor_result, Some(FactorResult::Waiting));
        assert!(response.factor_result.unwrap().is_waiting());
        assert!(response.state_token.is_some());
        assert!(response.session_token.is_none());
        assert!(response.embedded.is_some());
        assert!(response.links.is_some());
        assert!(response.expires_at.is_some());
    }

    #[test]
    fn test_decode_success_response() {
        let json = r#"{
            "expiresAt": "2015-11-03T10:15:57.000Z",
            "status": "SUCCESS",
            "sessionToken": "00Fpzf4en68pCXTsMjcX8JPMctzN2Wiw4LDOBL_9pe"
        }"#;

        let response: SuccessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.transaction_state(),
            Some(TransactionState::Success)
        );
        assert!(response.session_token.is_some());
        assert!(response.factor_result.is_none());
    }

    #[test]
    fn test_decode_response_without_status() {
        let response: SuccessResponse = serde_json::from_str("{}").unwrap();
        assert!(response.status.is_none());
        assert!(response.transaction_state().is_none());
    }

    #[test]
    fn test_decode_response_with_unknown_status() {
        let json = r#"{ "status": "SOMETHING_NEW" }"#;
        let response: SuccessResponse = serde_json::from_str(json).unwrap();

        // Raw value survives decoding even though it is outside the table
        assert_eq!(response.status.as_deref(), Some("SOMETHING_NEW"));
        assert!(response.transaction_state().is_none());
    }

    #[test]
    fn test_decode_error_response() {
        let json = r#"{
            "errorCode": "E0000004",
            "errorSummary": "Authentication failed",
            "errorLink": "E0000004",
            "errorId": "oaeuHRrvMnuRga5UzpKIOhKpQ",
            "errorCauses": [ { "errorSummary": "Invalid credentials" } ]
        }"#;

        let error: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(error.error_code.as_deref(), Some("E0000004"));
        assert_eq!(error.error_causes.len(), 1);
        assert_eq!(
            error.to_string(),
            "E0000004: Authentication failed"
        );
    }

    #[test]
    fn test_factor_result_wire_values() {
        let waiting: FactorResult = serde_json::from_str(r#""WAITING""#).unwrap();
        assert_eq!(waiting, FactorResult::Waiting);

        let exceeded: FactorResult = serde_json::from_str(r#""TIME_WINDOW_EXCEEDED""#).unwrap();
        assert_eq!(exceeded, FactorResult::TimeWindowExceeded);

        let rejected: FactorResult = serde_json::from_str(r#""REJECTED""#).unwrap();
        assert!(!rejected.is_waiting());
    }
}
