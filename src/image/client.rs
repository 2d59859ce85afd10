//! Azure OpenAI image edits client.

use crate::auth::{DefaultCredentialProvider, TokenProvider, COGNITIVE_SERVICES_SCOPE};
use crate::config::AzureOpenAiConfig;
use crate::error::Result;
use crate::image::multipart::build_multipart_form;
use crate::image::provider::ImageEditor;
use crate::image::response::decode_response;
use crate::image::types::{GeneratedImage, GenerationMetadata, ImageEditRequest};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Image generation is slow; allow a generous upper bound per request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Builder for [`AzureImageEditClient`].
#[derive(Default)]
pub struct AzureImageEditClientBuilder {
    config: Option<AzureOpenAiConfig>,
    credential: Option<Arc<dyn TokenProvider>>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl AzureImageEditClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource config. Falls back to the `AZURE_OPENAI_*` env vars.
    pub fn config(mut self, config: AzureOpenAiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the token provider. Falls back to Azure's default credential chain.
    pub fn credential(mut self, credential: Arc<dyn TokenProvider>) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Overrides the full edits URL instead of deriving it from the config.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Sets the request timeout (default: 5 minutes).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client, resolving config and credential.
    pub fn build(self) -> Result<AzureImageEditClient> {
        let config = match self.config {
            Some(config) => config,
            None => AzureOpenAiConfig::from_env()?,
        };
        let endpoint = self.endpoint.unwrap_or_else(|| config.edits_url());
        let credential: Arc<dyn TokenProvider> = match self.credential {
            Some(credential) => credential,
            None => Arc::new(DefaultCredentialProvider::new()?),
        };
        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(AzureImageEditClient {
            client,
            credential,
            config,
            endpoint,
        })
    }
}

/// Sends image edit requests to an Azure OpenAI deployment.
pub struct AzureImageEditClient {
    client: reqwest::Client,
    credential: Arc<dyn TokenProvider>,
    config: AzureOpenAiConfig,
    endpoint: String,
}

impl AzureImageEditClient {
    /// Creates a new `AzureImageEditClientBuilder`.
    pub fn builder() -> AzureImageEditClientBuilder {
        AzureImageEditClientBuilder::new()
    }

    /// Returns the URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the resource config.
    pub fn config(&self) -> &AzureOpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl ImageEditor for AzureImageEditClient {
    /// Acquires a token, uploads the request and decodes the returned image.
    ///
    /// Nothing is retried: every failure is returned as-is.
    async fn edit(&self, request: &ImageEditRequest) -> Result<GeneratedImage> {
        let start = Instant::now();

        let token = self
            .credential
            .acquire_token(&[COGNITIVE_SERVICES_SCOPE])
            .await?;

        let multipart = build_multipart_form(request)?;
        tracing::debug!(state = "built", content_type = %multipart.content_type);

        tracing::info!(
            endpoint = %self.endpoint,
            api_version = %self.config.api_version,
            images = request.images().len(),
            size = %request.size,
            "sending image edit request"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .multipart(multipart.form)
            .send()
            .await?;
        tracing::debug!(state = "sent");

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(state = "received", status = status.as_u16(), bytes = body.len());
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "image edit returned non-success status");
        }

        let data = decode_response(status.as_u16(), &body)?;
        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(state = "decoded", bytes = data.len(), duration_ms);

        Ok(GeneratedImage::new(
            data,
            GenerationMetadata {
                deployment: Some(self.config.deployment.clone()),
                duration_ms: Some(duration_ms),
            },
        ))
    }

    fn name(&self) -> &str {
        "Azure OpenAI (images/edits)"
    }
}

impl std::fmt::Debug for AzureImageEditClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureImageEditClient")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.config.deployment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use crate::error::AzEditError;

    fn test_config() -> AzureOpenAiConfig {
        AzureOpenAiConfig::new("res.openai.azure.com", "gpt-image-1", "2025-04-01-preview")
    }

    #[test]
    fn test_builder_derives_endpoint_from_config() {
        let client = AzureImageEditClient::builder()
            .config(test_config())
            .credential(Arc::new(StaticTokenProvider::new("t")))
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://res.openai.azure.com/openai/deployments/gpt-image-1/images/edits?api-version=2025-04-01-preview"
        );
    }

    #[test]
    fn test_builder_endpoint_override() {
        let client = AzureImageEditClient::builder()
            .config(test_config())
            .credential(Arc::new(StaticTokenProvider::new("t")))
            .endpoint("http://127.0.0.1:9/edits")
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/edits");
        assert_eq!(client.config().deployment, "gpt-image-1");
    }

    #[tokio::test]
    async fn test_missing_image_fails_before_network() {
        let client = AzureImageEditClient::builder()
            .config(test_config())
            .credential(Arc::new(StaticTokenProvider::new("t")))
            // unroutable: a network attempt would surface as Network, not ImageRead
            .endpoint("http://127.0.0.1:9/edits")
            .build()
            .unwrap();
        let request = ImageEditRequest::new("p", "/definitely/not/here.png");
        let err = client.edit(&request).await.unwrap_err();
        assert!(matches!(err, AzEditError::ImageRead { .. }));
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn test_credential_failure_is_auth_error() {
        let client = AzureImageEditClient::builder()
            .config(test_config())
            .credential(Arc::new(StaticTokenProvider::new("")))
            .endpoint("http://127.0.0.1:9/edits")
            .build()
            .unwrap();
        let request = ImageEditRequest::new("p", "fg.png");
        let err = client.edit(&request).await.unwrap_err();
        assert!(matches!(err, AzEditError::Auth(_)));
    }
}
