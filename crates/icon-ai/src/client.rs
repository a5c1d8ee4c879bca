//! Vision-model client seam.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request for synonym generation over one icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymRequest {
    /// Icon display name.
    pub icon_name: String,

    /// Base64-encoded PNG render of the icon.
    pub image_png_base64: String,

    /// Current effective description, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_description: Option<String>,

    /// Optional override of the default system message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    /// Optional override of the default user prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
}

/// Raw model output for a synonym request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymResponse {
    /// Model text, expected to be a comma-separated keyword list.
    pub raw_text: String,
}

/// A vision-capable completion endpoint that suggests searchable terms.
///
/// Implementations own all transport concerns: endpoint, credentials,
/// retries, and how [`crate::prompt`] templates are folded into the request.
/// Tests use stub implementations.
#[async_trait]
pub trait SynonymGenerator: Send + Sync {
    async fn generate(&self, request: &SynonymRequest) -> Result<SynonymResponse>;
}
