//! The prompt builder: renders the instruction text sent alongside the image.

use crate::metadata::LengthPreset;

/// Build the instruction text for one generation request.
///
/// The instruction demands a JSON-only reply with exactly two fields, `name`
/// and `tags`, and embeds the preset's numeric bounds verbatim. The bounds
/// are requested from the model here; they are not mechanically enforced on
/// the reply unless the client's strict validation is enabled.
///
/// # Examples
///
/// ```
/// use tagsmith::{LengthPreset, prompt::build_instruction};
///
/// let instruction = build_instruction(LengthPreset::Short);
/// assert!(instruction.contains("between 1 and 5 words"));
/// assert!(instruction.contains("between 2 and 10 tags"));
/// ```
pub fn build_instruction(preset: LengthPreset) -> String {
    let (min_words, max_words) = preset.name_word_bounds();
    let (min_tags, max_tags) = preset.tag_count_bounds();

    format!(
        "You are an expert image analyst. Your task is to generate a concise title and \
         relevant tags for the provided image.\n\
         \n\
         Respond ONLY with a valid JSON object. Do not include any other text, \
         explanations, or markdown formatting like ```json.\n\
         \n\
         The JSON object must have the following structure:\n\
         {{\n\
         \x20 \"name\": \"A descriptive title for the image, strictly between {min_words} and {max_words} words long.\",\n\
         \x20 \"tags\": [\"tag1\", \"tag2\", \"...\", \"tagN\"]\n\
         }}\n\
         \n\
         Rules for the JSON response:\n\
         1. The \"name\" field must be a string that is strictly between {min_words} and {max_words} words long.\n\
         2. The \"tags\" field must be an array of strings.\n\
         3. The \"tags\" array must contain between {min_tags} and {max_tags} tags.\n\
         4. Each tag in the array must be a single, lowercase English word.\n\
         5. Tags must not contain any spaces, hyphens, or special characters. They should be \
         simple, descriptive keywords."
    )
}
