//! The caller-facing entry point: one call in, one validated record or one
//! classified failure out.

use crate::backend::MetadataGenerator;
use crate::backend::media::InlineImage;
#[cfg(feature = "gemini")]
use crate::credentials::Credential;
use crate::error::Result;
#[cfg(feature = "gemini")]
use crate::error::TagsmithError;
use crate::metadata::{ImageMetadata, LengthPreset};

/// Generate a title and tags for an image with a default Gemini client.
///
/// This is the whole pipeline in one call: an empty credential
/// short-circuits with [`TagsmithError::CredentialMissing`] before any
/// network attempt, otherwise one request is dispatched and the reply is
/// validated. Each invocation is independent; overlapping calls share no
/// state, and there is no internal retry.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use tagsmith::{Credential, InlineImage, LengthPreset, generate_image_metadata};
///
/// let image = InlineImage::from_path("photo.jpg")?;
/// let credential = Credential::new(std::env::var("GEMINI_API_KEY")?);
/// let metadata = generate_image_metadata(&image, &credential, LengthPreset::Short).await?;
///
/// println!("{}: {}", metadata.name, metadata.tags.join(", "));
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "gemini")]
pub async fn generate_image_metadata(
    image: &InlineImage,
    credential: &Credential,
    preset: LengthPreset,
) -> Result<ImageMetadata> {
    if credential.is_empty() {
        tracing::warn!("no API key configured, skipping generation");
        return Err(TagsmithError::CredentialMissing);
    }

    let client = crate::backend::GeminiClient::new(credential.clone())?;
    client.generate_metadata(image, preset).await
}

/// Generate metadata through a caller-supplied generator.
///
/// Use this with a configured [`GeminiClient`](crate::GeminiClient) (custom
/// model, timeout, strict validation, Gemini-compatible endpoint) or with a
/// test double implementing [`MetadataGenerator`].
pub async fn generate_with<G>(
    generator: &G,
    image: &InlineImage,
    preset: LengthPreset,
) -> Result<ImageMetadata>
where
    G: MetadataGenerator + ?Sized,
{
    generator.generate_metadata(image, preset).await
}
