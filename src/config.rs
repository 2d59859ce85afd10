//! Azure OpenAI resource configuration.

use crate::error::{AzEditError, Result};

/// Environment variable holding the resource host (e.g. `myres.openai.azure.com`).
pub const RESOURCE_ENV: &str = "AZURE_OPENAI_RESOURCE";
/// Environment variable holding the image model deployment name.
pub const DEPLOYMENT_ENV: &str = "AZURE_OPENAI_DEPLOYMENT";
/// Environment variable holding the REST API version.
pub const API_VERSION_ENV: &str = "AZURE_OPENAI_API_VERSION";

/// Where to send image edit requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureOpenAiConfig {
    /// Resource host, without scheme.
    pub resource: String,
    /// Deployment identifier.
    pub deployment: String,
    /// Value of the `api-version` query parameter.
    pub api_version: String,
}

impl AzureOpenAiConfig {
    /// Creates a config from explicit values.
    pub fn new(
        resource: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            deployment: deployment.into(),
            api_version: api_version.into(),
        }
    }

    /// Reads the config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the config through `lookup`, reporting every missing variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let resource = get(RESOURCE_ENV);
        let deployment = get(DEPLOYMENT_ENV);
        let api_version = get(API_VERSION_ENV);

        match (resource, deployment, api_version) {
            (Some(resource), Some(deployment), Some(api_version)) => Ok(Self {
                resource,
                deployment,
                api_version,
            }),
            (resource, deployment, api_version) => {
                let missing: Vec<&str> = [
                    (RESOURCE_ENV, resource.is_none()),
                    (DEPLOYMENT_ENV, deployment.is_none()),
                    (API_VERSION_ENV, api_version.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(AzEditError::Config(format!(
                    "environment variables {} must be set",
                    missing.join(", ")
                )))
            }
        }
    }

    /// Returns the full image edits URL.
    pub fn edits_url(&self) -> String {
        let resource = self
            .resource
            .trim_start_matches("https://")
            .trim_end_matches('/');
        format!(
            "https://{}/openai/deployments/{}/images/edits?api-version={}",
            resource, self.deployment, self.api_version
        )
    }
}
