pub mod client;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod media;
#[cfg(feature = "gemini")]
pub(crate) mod utils;

pub use client::MetadataGenerator;
#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, Model as GeminiModel};
pub use media::InlineImage;
