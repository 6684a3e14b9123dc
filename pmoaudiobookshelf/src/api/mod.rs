//! Couche d'accès à l'API REST Audiobookshelf
//!
//! [`AbsApi`] is a thin, stateless wrapper around a `reqwest::Client`, a base
//! URL and a set of default headers. An anonymous instance is used for the
//! login exchange; once a [`Session`] exists, [`AbsApi::for_session`] builds
//! an authenticated one.

pub mod auth;
pub mod catalog;

use crate::error::{AbsError, Result};
use crate::session::Session;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Client API bas-niveau pour communiquer avec Audiobookshelf
#[derive(Debug, Clone)]
pub struct AbsApi {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl AbsApi {
    /// Anonymous API, only good for the login exchange
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            headers: HeaderMap::new(),
        }
    }

    /// API authenticated with the session's headers
    pub fn for_session(client: Client, session: &Session) -> Self {
        Self {
            client,
            base_url: session.base_url().to_string(),
            headers: session.auth_headers().clone(),
        }
    }

    /// Retourne l'URL de base
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Effectue une requête GET à l'API
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!("GET {} with {} params", url, params.len());

        let request = self.client.get(&url).headers(self.headers.clone()).query(params);
        let body = self.send(endpoint, request).await?;
        decode(endpoint, &body)
    }

    /// Effectue une requête POST avec un corps JSON
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &B,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!("POST {}", url);

        let request = self.client.post(&url).headers(self.headers.clone()).json(payload);
        let body = self.send(endpoint, request).await?;
        decode(endpoint, &body)
    }

    /// GET that only checks the status, the body is discarded
    pub(crate) async fn probe(&self, endpoint: &str) -> Result<()> {
        let url = self.url(endpoint);
        debug!("GET {} (probe)", url);

        let request = self.client.get(&url).headers(self.headers.clone());
        self.send(endpoint, request).await.map(|_| ())
    }

    /// Envoie la requête et retourne le corps si le statut est un succès
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("API error ({}) on {}: {}", status.as_u16(), endpoint, error_text);
            return Err(AbsError::from_status_code(endpoint, status.as_u16(), error_text));
        }

        Ok(response.text().await?)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        warn!("Failed to parse response from {}: {}", endpoint, e);
        AbsError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    #[test]
    fn test_anonymous_api_has_no_auth_header() {
        let api = AbsApi::new(Client::new(), "https://abs.local");
        assert_eq!(api.base_url(), "https://abs.local");
        assert!(api.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_session_api_carries_bearer() {
        let session = Session::new("https://abs.local", "tok").unwrap();
        let api = AbsApi::for_session(Client::new(), &session);
        assert_eq!(api.headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert_eq!(api.url("/api/libraries"), "https://abs.local/api/libraries");
    }

    #[test]
    fn test_decode_error_names_endpoint() {
        let err = decode::<serde_json::Value>("/api/search", "not json").unwrap_err();
        assert!(matches!(err, AbsError::Decode { ref endpoint, .. } if endpoint == "/api/search"));
    }
}
