//! Bearer token acquisition.

use crate::error::{AzEditError, Result};
use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};

/// Scope for Azure AI services (Cognitive Services) resources.
pub const COGNITIVE_SERVICES_SCOPE: &str = "https://cognitiveservices.azure.com/.default";

/// Something that can hand out a bearer token for the given scopes.
///
/// Implementations are not expected to cache; each call may hit the
/// credential source again.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Acquires a bearer token for `scopes`.
    async fn acquire_token(&self, scopes: &[&str]) -> Result<String>;
}

/// Resolves tokens through Azure's default credential chain (environment
/// service principal, managed identity, cached Azure CLI login).
pub struct DefaultCredentialProvider {
    credential: DefaultAzureCredential,
}

impl DefaultCredentialProvider {
    /// Creates the provider with default credential options.
    pub fn new() -> Result<Self> {
        let credential = DefaultAzureCredential::create(TokenCredentialOptions::default())
            .map_err(|e| AzEditError::Auth(format!("creating credential: {e}")))?;
        Ok(Self { credential })
    }
}

#[async_trait]
impl TokenProvider for DefaultCredentialProvider {
    async fn acquire_token(&self, scopes: &[&str]) -> Result<String> {
        let token = self
            .credential
            .get_token(scopes)
            .await
            .map_err(|e| AzEditError::Auth(format!("acquiring token: {e}")))?;
        tracing::debug!(expires_on = ?token.expires_on, "acquired bearer token");
        Ok(token.token.secret().to_string())
    }
}

/// Hands out a token the caller already holds.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Creates a provider that always returns `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn acquire_token(&self, _scopes: &[&str]) -> Result<String> {
        if self.token.is_empty() {
            return Err(AzEditError::Auth("empty bearer token".into()));
        }
        Ok(self.token.clone())
    }
}
