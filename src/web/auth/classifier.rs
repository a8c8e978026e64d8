//! Maps a failed authentication attempt onto a stable error code.
//!
//! Signals are consulted in strict precedence order: an explicit hint from
//! the verification middleware wins outright, then the cause recorded on a
//! bad-credentials error, then keyword matching on the error message, then
//! the cause alone. Anything unrecognized degrades to the generic code
//! rather than failing the 401 path.

use serde::Serialize;

use super::errors::{AuthError, FailureCause};

pub const DEFAULT_MESSAGE: &str = "Authentication failed";

/// Machine-readable codes exposed in the unauthorized response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    TokenExpired,
    InvalidSignature,
    MalformedToken,
    InvalidToken,
    ProcessingError,
    InvalidCredentials,
    AuthenticationError,
}

/// Tag attached by the verification middleware describing why a token
/// was rejected. `Other` carries tags this version does not know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintTag {
    Expired,
    Signature,
    Malformed,
    Invalid,
    Processing,
    Other(String),
}

/// Structured hint from the verification middleware. Both fields are
/// required; a tag without a message (or vice versa) is no hint at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailureHint {
    pub tag: HintTag,
    pub message: String,
}

impl AuthFailureHint {
    pub fn new(tag: HintTag, message: impl Into<String>) -> Self {
        Self {
            tag,
            message: message.into(),
        }
    }
}

/// Outcome of classification, rendered once into the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub code: ErrorCode,
    pub message: String,
}

impl Classification {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Classifies a failed authentication attempt. Total over its inputs:
/// never panics, always yields a code from [`ErrorCode`].
pub fn classify(hint: Option<&AuthFailureHint>, error: &AuthError) -> Classification {
    // The middleware saw the token failure first-hand, so its hint is
    // authoritative. The message is adopted even for tags we do not
    // recognize; only the code stays generic then.
    if let Some(hint) = hint {
        let code = match &hint.tag {
            HintTag::Expired => ErrorCode::TokenExpired,
            HintTag::Signature => ErrorCode::InvalidSignature,
            HintTag::Malformed => ErrorCode::MalformedToken,
            HintTag::Invalid => ErrorCode::InvalidToken,
            HintTag::Processing => ErrorCode::ProcessingError,
            HintTag::Other(_) => ErrorCode::AuthenticationError,
        };
        return Classification::new(code, hint.message.clone());
    }

    match error {
        AuthError::BadCredentials { message, cause } => {
            match (*cause).and_then(from_token_cause) {
                Some(classification) => classification,
                None => Classification::new(
                    ErrorCode::InvalidCredentials,
                    message.as_deref().unwrap_or(DEFAULT_MESSAGE),
                ),
            }
        }
        AuthError::Unauthenticated { message, cause } => {
            if let Some(message) = message.as_deref().filter(|m| !m.is_empty()) {
                from_message(message)
            } else {
                (*cause).and_then(from_token_cause).unwrap_or_else(|| {
                    Classification::new(ErrorCode::AuthenticationError, DEFAULT_MESSAGE)
                })
            }
        }
    }
}

fn from_token_cause(cause: FailureCause) -> Option<Classification> {
    match cause {
        FailureCause::Expired => Some(Classification::new(
            ErrorCode::TokenExpired,
            "JWT token has expired",
        )),
        FailureCause::BadSignature => Some(Classification::new(
            ErrorCode::InvalidSignature,
            "JWT token signature is invalid",
        )),
        FailureCause::Malformed => Some(Classification::new(
            ErrorCode::MalformedToken,
            "JWT token is malformed",
        )),
        FailureCause::OtherToken => Some(Classification::new(
            ErrorCode::InvalidToken,
            "JWT token is invalid",
        )),
        FailureCause::Unrelated => None,
    }
}

// Compatibility heuristic for failure paths that bypass the middleware
// hint: substring tests on free-text messages break whenever upstream
// wording changes, so this is a fallback, not a primary path.
fn from_message(message: &str) -> Classification {
    let lower = message.to_lowercase();
    if lower.contains("expired") {
        Classification::new(ErrorCode::TokenExpired, "JWT token has expired")
    } else if lower.contains("signature") {
        Classification::new(ErrorCode::InvalidSignature, "JWT token signature is invalid")
    } else if lower.contains("malformed") {
        Classification::new(ErrorCode::MalformedToken, "JWT token is malformed")
    } else if lower.contains("jwt") || lower.contains("token") {
        Classification::new(ErrorCode::InvalidToken, "JWT token is invalid")
    } else {
        Classification::new(ErrorCode::AuthenticationError, message)
    }
}
