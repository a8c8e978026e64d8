pub mod classifier;
pub mod errors;
pub mod response;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use hyper::header;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use serde::{Deserialize, Serialize};

use crate::utils::state::AppState;
use classifier::{AuthFailureHint, HintTag};
use errors::{AuthError, FailureCause};
use response::Unauthorized;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    pub exp: usize,
}

/// Authentication middleware guarding protected routes.
///
/// Verifies the bearer token and, on failure, rejects with the uniform
/// 401 body. The verification error is attached both as a structured
/// hint and as the cause of the raised [`AuthError`], so the classifier
/// can fall back when a failure path bypasses verification entirely.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, Unauthorized> {
    let path = request.uri().path().to_string();

    // Try to extract the token from the Authorization header
    let token = match request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
    {
        Some(token) => token,
        None => {
            return Err(Unauthorized {
                hint: None,
                error: AuthError::unauthenticated("Missing or invalid Authorization header"),
                path,
            });
        }
    };

    let claims =
        match jsonwebtoken::decode::<Claims>(token, &state.decoding_key, &state.validation) {
            Ok(token_data) => token_data.claims,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "bearer token rejected");
                return Err(Unauthorized {
                    hint: Some(verification_hint(&err)),
                    error: AuthError::bad_credentials(err.to_string(), failure_cause(&err)),
                    path,
                });
            }
        };

    // Insert the verified claims into request extensions
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Maps a verification error to the hint consumed by the classifier.
fn verification_hint(err: &JwtError) -> AuthFailureHint {
    let tag = match err.kind() {
        ErrorKind::ExpiredSignature => HintTag::Expired,
        ErrorKind::InvalidSignature => HintTag::Signature,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => HintTag::Malformed,
        // Key material problems are ours, not the caller's
        ErrorKind::InvalidKeyFormat | ErrorKind::InvalidAlgorithmName | ErrorKind::Crypto(_) => {
            HintTag::Processing
        }
        _ => HintTag::Invalid,
    };

    AuthFailureHint::new(tag, err.to_string())
}

fn failure_cause(err: &JwtError) -> FailureCause {
    match err.kind() {
        ErrorKind::ExpiredSignature => FailureCause::Expired,
        ErrorKind::InvalidSignature => FailureCause::BadSignature,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => FailureCause::Malformed,
        _ => FailureCause::OtherToken,
    }
}
