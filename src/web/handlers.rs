use axum::{response::IntoResponse, Extension, Json};

use crate::web::auth::Claims;

/// Returns the verified claims of the authenticated caller.
pub async fn me(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[tokio::test]
    async fn test_me_echoes_claims() {
        let claims = Claims {
            sub: "user-42".to_string(),
            iss: Some("https://issuer.example.com".to_string()),
            exp: 2_000_000_000,
        };

        let response = me(Extension(claims)).await.into_response();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["sub"], "user-42");
        assert_eq!(body["iss"], "https://issuer.example.com");
    }
}
