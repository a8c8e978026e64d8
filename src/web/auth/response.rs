use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use hyper::StatusCode;
use serde::Serialize;

use super::classifier::{classify, AuthFailureHint, Classification, ErrorCode};
use super::errors::AuthError;

/// Body of every unauthorized response, built fresh per request.
#[derive(Debug, Serialize)]
pub struct UnauthorizedBody {
    pub timestamp: String,
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    #[serde(rename = "errorCode")]
    pub error_code: ErrorCode,
    pub path: String,
}

/// Renders a classification as the uniform 401 response.
pub fn render(classification: Classification, path: &str, now: DateTime<Utc>) -> Response {
    let body = UnauthorizedBody {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        status: StatusCode::UNAUTHORIZED.as_u16(),
        error: "Unauthorized",
        message: classification.message,
        error_code: classification.code,
        path: path.to_string(),
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// Rejection returned by the auth middleware: carries the raw failure
/// signals and classifies them when the response is produced.
#[derive(Debug)]
pub struct Unauthorized {
    pub hint: Option<AuthFailureHint>,
    pub error: AuthError,
    pub path: String,
}

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let classification = classify(self.hint.as_ref(), &self.error);
        render(classification, &self.path, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use chrono::TimeZone;
    use serde_json::Value;

    #[tokio::test]
    async fn test_render_sets_status_and_content_type() {
        let classification = Classification {
            code: ErrorCode::TokenExpired,
            message: "JWT token has expired".to_string(),
        };

        let response = render(classification, "/me", Utc::now());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(hyper::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_render_body_fields() {
        let classification = Classification {
            code: ErrorCode::InvalidSignature,
            message: "JWT token signature is invalid".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 45).unwrap();

        let response = render(classification, "/api/orders", now);
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["timestamp"], "2024-05-17T12:30:45.000Z");
        assert_eq!(body["status"], 401);
        assert_eq!(body["error"], "Unauthorized");
        assert_eq!(body["message"], "JWT token signature is invalid");
        assert_eq!(body["errorCode"], "INVALID_SIGNATURE");
        assert_eq!(body["path"], "/api/orders");
    }

    #[tokio::test]
    async fn test_unauthorized_rejection_classifies_on_render() {
        let rejection = Unauthorized {
            hint: None,
            error: AuthError::unauthenticated("account locked"),
            path: "/me".to_string(),
        };

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errorCode"], "AUTHENTICATION_ERROR");
        assert_eq!(body["message"], "account locked");
    }
}
