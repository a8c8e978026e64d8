use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;

use crate::config::Config;

/// Shared verification material, cloned cheaply into every request.
#[derive(Clone)]
pub struct AppState {
    pub decoding_key: Arc<DecodingKey>,
    pub validation: Arc<Validation>,
}

impl AppState {
    pub fn new(secret: &[u8], issuer: Option<&str>, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(secret)),
            validation: Arc::new(validation),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.auth.secret.expose_secret().as_bytes(),
            config.auth.issuer.as_deref(),
            config.auth.leeway,
        )
    }
}
