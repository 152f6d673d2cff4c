use std::fmt;

use thiserror::Error;

/// Error types for the tagsmith library.
///
/// Each variant is one of the failure kinds a metadata generation request can
/// end in. The `Display` implementation carries the single human-readable
/// message for that kind; the underlying technical cause (HTTP status, serde
/// error, raw reply) is logged at the point of failure and, for transport
/// failures, kept in the `detail` field for diagnostics. It is never part of
/// the user-facing message.
///
/// # Examples
///
/// ```
/// use tagsmith::{TagsmithError, Result};
///
/// fn require_key(key: &str) -> Result<()> {
///     if key.is_empty() {
///         return Err(TagsmithError::CredentialMissing);
///     }
///     Ok(())
/// }
///
/// match require_key("") {
///     Err(TagsmithError::CredentialMissing) => println!("ask the user for a key"),
///     Err(e) => println!("unexpected error: {}", e),
///     Ok(()) => println!("ready"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagsmithError {
    /// No API key was supplied; the request is never dispatched.
    #[error("API key is not set. Please add your API key in the settings.")]
    CredentialMissing,

    /// The remote service rejected the supplied API key.
    #[error("Your API key is not valid. Please check it in the settings.")]
    CredentialInvalid,

    /// The model replied, but the reply could not be turned into metadata.
    #[error("The model reply could not be read as metadata: {0}.")]
    MalformedResponse(MalformedKind),

    /// The network call itself failed: timeout, connectivity, or a service
    /// error that is not a credential rejection.
    #[error("Failed to generate metadata from the image. Please try again.")]
    TransportFailure { detail: String },

    /// Loading or saving a stored credential failed.
    #[error("Could not access the stored API key: {0}")]
    CredentialStore(String),

    /// Reading image bytes from disk failed.
    #[error("Could not read the image file: {0}")]
    ImageRead(String),
}

/// How a received model reply failed the metadata contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// The reply text (after fence stripping) was not parseable as JSON.
    InvalidJson,
    /// The reply parsed as JSON but did not match the `{name, tags}` shape.
    SchemaViolation,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::InvalidJson => write!(f, "invalid JSON"),
            MalformedKind::SchemaViolation => write!(f, "schema violation"),
        }
    }
}

/// A specialized Result type for tagsmith operations.
///
/// # Examples
///
/// ```
/// use tagsmith::Result;
///
/// fn parse_tag_count(raw: &str) -> Result<usize> {
///     let value: serde_json::Value = serde_json::from_str(raw)
///         .map_err(|_| tagsmith::TagsmithError::MalformedResponse(
///             tagsmith::MalformedKind::InvalidJson,
///         ))?;
///     Ok(value["tags"].as_array().map(|t| t.len()).unwrap_or(0))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TagsmithError>;
