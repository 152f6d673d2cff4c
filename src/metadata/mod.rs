//! The metadata domain model: the generated record and the length presets
//! that bound it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MalformedKind, Result, TagsmithError};

/// The generated metadata record: a short human-readable title plus an
/// ordered list of descriptive tags.
///
/// A record is created fresh per generation request and held transiently by
/// the caller for display; the library never persists it. The minimal
/// contract enforced on every parsed reply is that `name` is a non-empty
/// string and `tags` is an array of strings. The per-preset bounds are
/// requested from the model in the instruction text and re-checked only when
/// strict validation is enabled (see [`ImageMetadata::validate_against`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub name: String,
    pub tags: Vec<String>,
}

impl ImageMetadata {
    /// Check this record against the bounds of a preset.
    ///
    /// This is the opt-in strict pass: name word count and tag count must
    /// fall within the preset's ranges, and every tag must be a single
    /// lowercase English word. Violations are reported as a schema
    /// violation, the same kind a structurally broken reply produces.
    pub fn validate_against(&self, preset: LengthPreset) -> Result<()> {
        let (min_words, max_words) = preset.name_word_bounds();
        let words = self.name.split_whitespace().count();
        if words < min_words || words > max_words {
            warn!(
                words,
                min_words, max_words, "name word count outside preset bounds"
            );
            return Err(TagsmithError::MalformedResponse(
                MalformedKind::SchemaViolation,
            ));
        }

        let (min_tags, max_tags) = preset.tag_count_bounds();
        if self.tags.len() < min_tags || self.tags.len() > max_tags {
            warn!(
                count = self.tags.len(),
                min_tags, max_tags, "tag count outside preset bounds"
            );
            return Err(TagsmithError::MalformedResponse(
                MalformedKind::SchemaViolation,
            ));
        }

        for tag in &self.tags {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_lowercase()) {
                warn!(tag = %tag, "tag is not a single lowercase word");
                return Err(TagsmithError::MalformedResponse(
                    MalformedKind::SchemaViolation,
                ));
            }
        }

        Ok(())
    }
}

/// How much metadata to ask the model for.
///
/// Each preset carries two inclusive ranges: the expected word count of the
/// generated name and the expected number of tags. The ranges are rendered
/// verbatim into the instruction text; they constrain the *request*, not the
/// reply, unless strict validation is turned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthPreset {
    /// Name of 1-5 words, 2-10 tags.
    Short,
    /// Name of 5-15 words, 20-40 tags.
    Detailed,
}

impl LengthPreset {
    /// Inclusive (min, max) word count for the generated name.
    pub fn name_word_bounds(&self) -> (usize, usize) {
        match self {
            LengthPreset::Short => (1, 5),
            LengthPreset::Detailed => (5, 15),
        }
    }

    /// Inclusive (min, max) number of tags.
    pub fn tag_count_bounds(&self) -> (usize, usize) {
        match self {
            LengthPreset::Short => (2, 10),
            LengthPreset::Detailed => (20, 40),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthPreset::Short => "short",
            LengthPreset::Detailed => "detailed",
        }
    }
}

impl fmt::Display for LengthPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "short" => Ok(LengthPreset::Short),
            "detailed" => Ok(LengthPreset::Detailed),
            other => Err(format!(
                "unknown length preset '{}', expected 'short' or 'detailed'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(name: &str, tags: &[&str]) -> ImageMetadata {
        ImageMetadata {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_preset_bounds() {
        assert_eq!(LengthPreset::Short.name_word_bounds(), (1, 5));
        assert_eq!(LengthPreset::Short.tag_count_bounds(), (2, 10));
        assert_eq!(LengthPreset::Detailed.name_word_bounds(), (5, 15));
        assert_eq!(LengthPreset::Detailed.tag_count_bounds(), (20, 40));
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("short".parse(), Ok(LengthPreset::Short));
        assert_eq!("detailed".parse(), Ok(LengthPreset::Detailed));
        assert!("medium".parse::<LengthPreset>().is_err());
    }

    #[test]
    fn test_validate_accepts_in_bounds_record() {
        let record = metadata("Red Fox", &["animal", "fox", "wildlife"]);
        assert!(record.validate_against(LengthPreset::Short).is_ok());
    }

    #[test]
    fn test_validate_rejects_name_outside_bounds() {
        let record = metadata(
            "A very long and quite unnecessarily wordy title",
            &["animal", "fox"],
        );
        assert_eq!(
            record.validate_against(LengthPreset::Short),
            Err(TagsmithError::MalformedResponse(
                MalformedKind::SchemaViolation
            ))
        );
    }

    #[test]
    fn test_validate_rejects_too_few_tags() {
        let record = metadata("Red Fox", &["animal"]);
        assert_eq!(
            record.validate_against(LengthPreset::Short),
            Err(TagsmithError::MalformedResponse(
                MalformedKind::SchemaViolation
            ))
        );
    }

    #[test]
    fn test_validate_rejects_tags_with_separators_or_case() {
        for bad in ["red fox", "red-fox", "Fox", "fox!", ""] {
            let record = metadata("Red Fox", &["animal", bad]);
            assert_eq!(
                record.validate_against(LengthPreset::Short),
                Err(TagsmithError::MalformedResponse(
                    MalformedKind::SchemaViolation
                )),
                "tag {:?} should be rejected",
                bad
            );
        }
    }
}
