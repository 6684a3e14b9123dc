//! Gestion des erreurs pour le client Audiobookshelf
//!
//! [`AbsError`] describes what went wrong at the transport level. It never
//! crosses the plugin boundary: operations convert it into a
//! [`PluginError`] with [`AbsError::into_auth_error`] or
//! [`AbsError::into_upstream_error`].

use pmosource::{AuthPhase, PluginError};
use thiserror::Error;

/// Type Result personnalisé pour pmoaudiobookshelf
pub type Result<T> = std::result::Result<T, AbsError>;

/// Errors raised while talking to an Audiobookshelf server
#[derive(Error, Debug)]
pub enum AbsError {
    /// Transport failure (connection, DNS, TLS, malformed URL)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned HTTP {code} on {endpoint}: {body}")]
    Status {
        endpoint: String,
        code: u16,
        body: String,
    },

    /// The body could not be decoded
    #[error("Invalid JSON from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body was valid JSON but lacked a required field
    #[error("Missing field '{field}' in response from {endpoint}")]
    MissingField {
        endpoint: String,
        field: &'static str,
    },

    /// The token cannot be carried in an HTTP header
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl AbsError {
    /// Crée une erreur depuis un code de statut HTTP et le corps de la réponse
    pub fn from_status_code(endpoint: impl Into<String>, code: u16, body: impl Into<String>) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            code,
            body: body.into(),
        }
    }

    /// HTTP status attached to the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            AbsError::Status { code, .. } => Some(*code),
            AbsError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Vérifie si l'erreur est une erreur de credentials (401/403)
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    fn endpoint(&self) -> String {
        match self {
            AbsError::Status { endpoint, .. }
            | AbsError::Decode { endpoint, .. }
            | AbsError::MissingField { endpoint, .. } => endpoint.clone(),
            AbsError::Http(e) => e.url().map(|u| u.path().to_string()).unwrap_or_default(),
            AbsError::InvalidHeader(_) => String::new(),
        }
    }

    /// Converts a failure of the initialization handshake
    ///
    /// Shape problems become [`PluginError::Protocol`]; everything else is an
    /// authentication failure for the given phase. A rejected login keeps the
    /// raw response body as message.
    pub fn into_auth_error(self, phase: AuthPhase) -> PluginError {
        match self {
            AbsError::Decode { .. } | AbsError::MissingField { .. } | AbsError::InvalidHeader(_) => {
                PluginError::Protocol {
                    endpoint: self.endpoint(),
                    message: self.to_string(),
                }
            }
            AbsError::Status { code, body, .. } => PluginError::Authentication {
                phase,
                status: Some(code),
                message: match phase {
                    AuthPhase::Login => body,
                    AuthPhase::Verification => "verification failed".to_string(),
                },
            },
            AbsError::Http(e) => PluginError::Authentication {
                phase,
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
        }
    }

    /// Converts the failure of a query issued with a published session
    pub fn into_upstream_error(self, operation: &str) -> PluginError {
        let endpoint = self.endpoint();
        match self {
            AbsError::Decode { .. } | AbsError::MissingField { .. } => PluginError::Protocol {
                endpoint,
                message: format!("{} failed: {}", operation, self),
            },
            _ => PluginError::Upstream {
                operation: operation.to_string(),
                endpoint,
                status: self.status(),
                message: self.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_login_keeps_body() {
        let err = AbsError::from_status_code("/api/auth/login", 401, "Invalid credentials")
            .into_auth_error(AuthPhase::Login);
        match err {
            PluginError::Authentication {
                phase,
                status,
                message,
            } => {
                assert_eq!(phase, AuthPhase::Login);
                assert_eq!(status, Some(401));
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejected_probe_reports_verification() {
        let err = AbsError::from_status_code("/api/libraries", 403, "")
            .into_auth_error(AuthPhase::Verification);
        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("verification failed"));
    }

    #[test]
    fn test_missing_token_is_protocol_error() {
        let err = AbsError::MissingField {
            endpoint: "/api/auth/login".to_string(),
            field: "token",
        }
        .into_auth_error(AuthPhase::Login);
        match err {
            PluginError::Protocol { endpoint, message } => {
                assert_eq!(endpoint, "/api/auth/login");
                assert!(message.contains("token"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_upstream_error_keeps_status_and_endpoint() {
        let err = AbsError::from_status_code("/api/search", 500, "boom").into_upstream_error("Search");
        match err {
            PluginError::Upstream {
                operation,
                endpoint,
                status,
                message,
            } => {
                assert_eq!(operation, "Search");
                assert_eq!(endpoint, "/api/search");
                assert_eq!(status, Some(500));
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_is_auth_error() {
        assert!(AbsError::from_status_code("/x", 401, "").is_auth_error());
        assert!(AbsError::from_status_code("/x", 403, "").is_auth_error());
        assert!(!AbsError::from_status_code("/x", 500, "").is_auth_error());
    }
}
