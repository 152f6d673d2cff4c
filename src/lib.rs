//! tagsmith: generate a validated title and tag set for an image
//!
//! # Overview
//!
//! tagsmith sends an image to Google Gemini together with a JSON-only
//! instruction and turns the reply into a strict `{name, tags}` record. The
//! interesting surface is small and deliberate: a prompt builder that embeds
//! the requested bounds, a response validator that tolerates markdown-fenced
//! replies but nothing else, and a classified failure for everything that can
//! go wrong (missing key, rejected key, malformed reply, transport failure).
//!
//! Key pieces:
//! - [`LengthPreset`]: `Short` or `Detailed`, bounding name length and tag count
//! - [`InlineImage`]: base64 image payload built from bytes or a file path
//! - [`generate_image_metadata`]: the one-call pipeline
//! - [`GeminiClient`]: the configurable client (model, timeout, strict validation)
//! - [`CredentialStore`]: load/save capability for persisting the API key
//!
//! # Quick Start
//!
//! ```no_run
//! use tagsmith::{Credential, InlineImage, LengthPreset, generate_image_metadata};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let image = InlineImage::from_path("photo.jpg")?;
//!     let credential = Credential::new(std::env::var("GEMINI_API_KEY")?);
//!
//!     let metadata = generate_image_metadata(&image, &credential, LengthPreset::Short).await?;
//!
//!     println!("name: {}", metadata.name);
//!     println!("tags: {}", metadata.tags.join(", "));
//!     Ok(())
//! }
//! ```

mod backend;
mod error;
mod pipeline;

pub mod credentials;
#[cfg(feature = "logging")]
pub mod logging;
pub mod metadata;
pub mod prompt;
pub mod response;

// Re-exports for convenience
pub use backend::{InlineImage, MetadataGenerator};
pub use credentials::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{MalformedKind, Result, TagsmithError};
pub use metadata::{ImageMetadata, LengthPreset};
pub use pipeline::generate_with;

#[cfg(feature = "gemini")]
pub use backend::{GeminiClient, GeminiModel};
#[cfg(feature = "gemini")]
pub use pipeline::generate_image_metadata;
