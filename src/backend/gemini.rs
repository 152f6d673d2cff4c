use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};

use crate::backend::client::MetadataGenerator;
use crate::backend::media::InlineImage;
use crate::backend::utils::{check_response_status, handle_http_error};
use crate::credentials::Credential;
use crate::error::{Result, TagsmithError};
use crate::metadata::{ImageMetadata, LengthPreset};
use crate::prompt;
use crate::response::parse_metadata;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini models available for metadata generation.
///
/// For the latest available models and their identifiers, check the
/// [Google AI Models Documentation](https://ai.google.dev/models). Only
/// vision-capable models make sense here; the listed variants all accept
/// inline image parts.
///
/// # Using Custom Models
///
/// Any model name can be supplied via the `Custom` variant or `FromStr`:
///
/// ```rust
/// use tagsmith::GeminiModel;
/// use std::str::FromStr;
///
/// let model = GeminiModel::Custom("gemini-custom".to_string());
/// let model = GeminiModel::from_str("gemini-custom").unwrap();
/// let model = GeminiModel::from_string("gemini-custom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    /// Gemini 2.5 Pro (latest production Pro model)
    Gemini25Pro,
    /// Gemini 2.5 Flash (best price/performance, the default)
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite (smaller, faster variant)
    Gemini25FlashLite,
    /// Gemini 2.0 Flash (stable 2.0 Flash model)
    Gemini20Flash,
    /// Custom model name (for new models or Gemini-compatible endpoints)
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Custom(name) => name,
        }
    }

    /// Create a model from a string. This always succeeds: unknown names
    /// become `Custom(name)`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            _ => Model::Custom(name),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::from_string(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::from_string(s)
    }
}

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub credential: Credential,
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    /// Custom base URL for Gemini-compatible APIs.
    /// Defaults to "https://generativelanguage.googleapis.com/v1beta" if not set.
    pub base_url: Option<String>,
    /// Re-check parsed replies against the preset bounds. Off by default:
    /// the bounds are requested from the model, and an otherwise-useful
    /// reply that overshoots them is still returned.
    pub strict_validation: bool,
}

/// Gemini client for generating image metadata
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

// Gemini API request and response structures
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

impl Part {
    fn image(image: &InlineImage) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type().to_string(),
                data: image.data().to_string(),
            },
        }
    }

    fn text(text: String) -> Self {
        Part::Text { text }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
    #[serde(rename = "finishReason", default)]
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client with the provided API key.
    ///
    /// An empty key fails immediately with
    /// [`TagsmithError::CredentialMissing`]; no network attempt is made.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use tagsmith::GeminiClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new("your-gemini-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new", skip(credential))]
    pub fn new(credential: impl Into<Credential>) -> Result<Self> {
        let credential = credential.into();
        if credential.is_empty() {
            return Err(TagsmithError::CredentialMissing);
        }

        let config = GeminiConfig {
            credential,
            model: Model::Gemini25Flash,
            temperature: 0.0,
            max_tokens: None,
            timeout: None, // Default: no timeout (uses reqwest's default)
            base_url: None,
            strict_validation: false,
        };

        let client = reqwest::Client::new();

        info!(model = %config.model.as_str(), "Created Gemini client");

        Ok(Self { config, client })
    }

    /// Create a new Gemini client by reading the API key from the
    /// `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`TagsmithError::CredentialMissing`] if `GEMINI_API_KEY` is
    /// not set.
    #[instrument(name = "gemini_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            error!("GEMINI_API_KEY environment variable is not set");
            TagsmithError::CredentialMissing
        })?;
        Self::new(key)
    }

    /// Set the model to use
    #[instrument(skip(self))]
    pub fn model(mut self, model: Model) -> Self {
        debug!(
            previous_model = ?self.config.model,
            new_model = ?model,
            "Setting Gemini model"
        );
        self.config.model = model;
        self
    }

    /// Set the temperature (0.0 to 1.0, lower = more deterministic)
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.config.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.config.temperature = temp;
        self
    }

    /// Set the maximum tokens the model may generate for the reply
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(
            previous_max = ?self.config.max_tokens,
            new_max = max,
            "Setting max_tokens"
        );
        // Keep max_tokens at least 1 to avoid API errors
        self.config.max_tokens = Some(max.max(1));
        self
    }

    /// Set the timeout for HTTP requests.
    ///
    /// The timeout applies to each request made by the client; a lapse
    /// surfaces as [`TagsmithError::TransportFailure`].
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(
            previous_timeout = ?self.config.timeout,
            new_timeout = ?timeout,
            "Setting timeout"
        );
        self.config.timeout = Some(timeout);

        // Rebuild the reqwest client with the timeout immediately
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    "Failed to build reqwest client with timeout, using default"
                );
                reqwest::Client::new()
            });

        self
    }

    /// Set a custom base URL for Gemini-compatible APIs.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL without trailing slash (e.g., "http://localhost:1234/v1beta")
    #[instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url_str = base_url.into();
        debug!(
            previous_base_url = ?self.config.base_url,
            new_base_url = %base_url_str,
            "Setting custom base URL"
        );
        self.config.base_url = Some(base_url_str);
        self
    }

    /// Enforce the preset bounds on parsed replies.
    ///
    /// When enabled, a reply whose name word count or tag count falls
    /// outside the preset ranges, or whose tags are not single lowercase
    /// words, is rejected as a schema violation instead of being returned.
    #[instrument(skip(self))]
    pub fn strict_validation(mut self, strict: bool) -> Self {
        debug!(
            previous = self.config.strict_validation,
            new = strict,
            "Setting strict validation"
        );
        self.config.strict_validation = strict;
        self
    }

    /// Generate a title and tags for one image.
    ///
    /// Builds the multimodal request (inline image part + instruction part),
    /// dispatches exactly one `generateContent` call, and validates the
    /// reply. No retries are performed; the caller may re-invoke manually.
    #[instrument(
        name = "gemini_generate_metadata",
        skip(self, image),
        fields(
            model = %self.config.model.as_str(),
            mime_type = %image.mime_type(),
            preset = %preset
        )
    )]
    pub async fn generate_metadata(
        &self,
        image: &InlineImage,
        preset: LengthPreset,
    ) -> Result<ImageMetadata> {
        info!("Generating image metadata with Gemini");

        let instruction = prompt::build_instruction(preset);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::image(image), Part::text(instruction)],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
                // Ask the service for a JSON-only reply; fence stripping
                // still guards against models that ignore the hint.
                response_mime_type: "application/json".to_string(),
            },
        };

        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = format!(
            "{}/models/{}:generateContent",
            base_url,
            self.config.model.as_str()
        );
        debug!(url = %url, "Sending request to Gemini API");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.credential.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;

        let response = check_response_status(response, "Gemini").await?;

        debug!("Successfully received response from Gemini API");
        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;

        let Some(candidate) = completion.candidates.first() else {
            error!("Gemini API returned no completion candidates");
            return Err(TagsmithError::TransportFailure {
                detail: "no completion candidates returned".to_string(),
            });
        };
        trace!(finish_reason = %candidate.finish_reason, "Completion finish reason");

        let Some(text) = candidate
            .content
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
        else {
            error!("No text content in Gemini response");
            return Err(TagsmithError::TransportFailure {
                detail: "no text content in response".to_string(),
            });
        };

        debug!(content_len = text.len(), "Processing reply text");
        let metadata = parse_metadata(text)?;

        if self.config.strict_validation {
            metadata.validate_against(preset)?;
        }

        info!(tags = metadata.tags.len(), "Generated image metadata");
        Ok(metadata)
    }
}

#[async_trait]
impl MetadataGenerator for GeminiClient {
    async fn generate_metadata(
        &self,
        image: &InlineImage,
        preset: LengthPreset,
    ) -> Result<ImageMetadata> {
        GeminiClient::generate_metadata(self, image, preset).await
    }
}
