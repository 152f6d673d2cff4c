//! Detailed preset with strict validation, persisting the API key through a
//! file-backed credential store: loaded on startup, seeded from the
//! environment on first run.
//!
//! ```bash
//! export GEMINI_API_KEY=your_key_here
//! cargo run --example strict_detailed -- photo.jpg
//! ```

use tagsmith::logging::{LogLevel, init_logging};
use tagsmith::{
    Credential, CredentialStore, FileCredentialStore, GeminiClient, GeminiModel, InlineImage,
    LengthPreset, generate_with,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Debug);

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: strict_detailed <image>")?;

    let store = FileCredentialStore::new(".gemini_api_key");
    let credential = match store.load()? {
        Some(credential) => credential,
        None => {
            let key = std::env::var("GEMINI_API_KEY")
                .map_err(|_| "no stored key and GEMINI_API_KEY is not set")?;
            let credential = Credential::new(key);
            store.save(&credential)?;
            credential
        }
    };

    let image = InlineImage::from_path(&path)?;
    let client = GeminiClient::new(credential)?
        .model(GeminiModel::Gemini25Pro)
        .strict_validation(true);

    let metadata = generate_with(&client, &image, LengthPreset::Detailed).await?;

    println!("name: {}", metadata.name);
    for tag in &metadata.tags {
        println!("  #{tag}");
    }
    Ok(())
}
