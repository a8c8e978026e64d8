use thiserror::Error;

/// Token-level failure recorded as the cause of an authentication error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    Expired,
    BadSignature,
    Malformed,
    /// A token error not covered by the variants above.
    OtherToken,
    /// A failure that did not originate from token verification.
    Unrelated,
}

/// The authentication failure handed to the classifier.
///
/// `BadCredentials` marks failures where credentials were presented and
/// rejected; its cause, when present, records the token-level reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{}", message.as_deref().unwrap_or("Authentication failed"))]
    BadCredentials {
        message: Option<String>,
        cause: Option<FailureCause>,
    },
    #[error("{}", message.as_deref().unwrap_or("Authentication failed"))]
    Unauthenticated {
        message: Option<String>,
        cause: Option<FailureCause>,
    },
}

impl AuthError {
    pub fn bad_credentials(message: impl Into<String>, cause: FailureCause) -> Self {
        Self::BadCredentials {
            message: Some(message.into()),
            cause: Some(cause),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: Some(message.into()),
            cause: None,
        }
    }
}
