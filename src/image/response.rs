//! Response envelope for the image edits endpoint.

use crate::error::{truncate, AzEditError, Result};
use base64::Engine;
use serde::{Deserialize, Deserializer};

/// Bytes of raw body kept in diagnostics when the envelope can't be parsed.
const RAW_PREVIEW_BYTES: usize = 500;

/// JSON body returned by `images/edits`.
#[derive(Debug, Default, Deserialize)]
pub struct ImageEditResponse {
    /// Results, one per generated image. Missing and `null` both read as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<ImageEditData>,
    /// Error object, present on failure.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// One generated image.
#[derive(Debug, Default, Deserialize)]
pub struct ImageEditData {
    /// Base64 encoded image.
    #[serde(default)]
    pub b64_json: Option<String>,
}

/// Structured error reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Human readable message.
    #[serde(default, deserialize_with = "string_or_json")]
    pub message: String,
    /// Error category (`type` on the wire).
    #[serde(default, rename = "type", deserialize_with = "string_or_json")]
    pub error_type: String,
    /// Machine readable code.
    #[serde(default, deserialize_with = "string_or_json")]
    pub code: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON string verbatim, renders any other value as its JSON text,
/// and maps `null` to an empty string.
fn string_or_json<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

impl ImageEditResponse {
    /// Parses a full response body. `status` is only used for diagnostics.
    pub fn parse(status: u16, body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| AzEditError::UnexpectedResponse {
            status,
            message: e.to_string(),
            raw: truncate(&String::from_utf8_lossy(body), RAW_PREVIEW_BYTES),
        })
    }

    /// Returns the decoded first image.
    ///
    /// An `error` object wins over any `data`; an empty `data` list or payload
    /// is [`AzEditError::NoImageData`]; corrupt base64 is [`AzEditError::Decode`].
    pub fn into_image_bytes(self) -> Result<Vec<u8>> {
        if let Some(err) = self.error {
            return Err(AzEditError::Api {
                message: err.message,
                error_type: err.error_type,
                code: err.code,
            });
        }

        let b64 = self
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .filter(|b64| !b64.is_empty())
            .ok_or(AzEditError::NoImageData)?;

        base64::engine::general_purpose::STANDARD
            .decode(b64.as_bytes())
            .map_err(|e| AzEditError::Decode(e.to_string()))
    }
}

/// Parses a response body and decodes the first image in one step.
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<u8>> {
    ImageEditResponse::parse(status, body)?.into_image_bytes()
}
