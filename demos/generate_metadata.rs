//! Generate a title and tags for an image file.
//!
//! ```bash
//! export GEMINI_API_KEY=your_key_here
//! cargo run --example generate_metadata -- photo.jpg short
//! ```

use tagsmith::logging::{LogLevel, init_logging};
use tagsmith::{GeminiClient, InlineImage, LengthPreset};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Info);

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: generate_metadata <image> [short|detailed]")?;
    let preset = match args.next() {
        Some(raw) => raw.parse::<LengthPreset>()?,
        None => LengthPreset::Short,
    };

    let image = InlineImage::from_path(&path)?;
    let client = GeminiClient::from_env()?;
    let metadata = client.generate_metadata(&image, preset).await?;

    println!("name: {}", metadata.name);
    println!("tags: {}", metadata.tags.join(", "));
    Ok(())
}
