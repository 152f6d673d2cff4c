use async_trait::async_trait;

use crate::backend::media::InlineImage;
use crate::error::Result;
use crate::metadata::{ImageMetadata, LengthPreset};

/// The seam between orchestration and transport.
///
/// [`GeminiClient`](crate::GeminiClient) is the one real implementation;
/// test doubles implement this trait to exercise the pipeline without a
/// network. One call corresponds to one logical request: no internal
/// retries, no batching, no shared mutable state between invocations.
#[async_trait]
pub trait MetadataGenerator {
    /// Generate a title and tags for one image.
    ///
    /// Returns a fully validated [`ImageMetadata`] or one of the classified
    /// failures; never a partial record.
    async fn generate_metadata(
        &self,
        image: &InlineImage,
        preset: LengthPreset,
    ) -> Result<ImageMetadata>;
}
