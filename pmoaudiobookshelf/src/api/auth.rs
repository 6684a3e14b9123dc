//! Module d'authentification pour l'API Audiobookshelf

use super::AbsApi;
use crate::error::{AbsError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

pub(crate) const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub(crate) const VERIFY_ENDPOINT: &str = "/api/libraries";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl AbsApi {
    /// Échange les credentials contre un token
    ///
    /// # Errors
    ///
    /// * `AbsError::Status` - the server rejected the credentials (body kept verbatim)
    /// * `AbsError::Decode` - the body is not JSON
    /// * `AbsError::MissingField` - no non-empty `token` in the body
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        info!("Attempting to login to Audiobookshelf");

        let response: Value = self
            .post_json(LOGIN_ENDPOINT, &LoginRequest { username, password })
            .await?;

        let token = response
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AbsError::MissingField {
                endpoint: LOGIN_ENDPOINT.to_string(),
                field: "token",
            })?;

        debug!("Login successful, token received");
        Ok(token.to_string())
    }

    /// Vérifie que le token est accepté par le serveur
    pub async fn verify(&self) -> Result<()> {
        self.probe(VERIFY_ENDPOINT).await?;
        debug!("Token verified against {}", VERIFY_ENDPOINT);
        Ok(())
    }
}
