//! Turns one product photo into a catalog shot.
//!
//! Run with: `cargo run --example transform_product -- <photo.jpg>`
//!
//! Requires `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) environment variable.

use silk_studio::{GenerateOutcome, SelectedFile, StudioConfig, StudioController};
use std::sync::Arc;

#[tokio::main]
async fn main() -> silk_studio::Result<()> {
    let input_path = std::env::args()
        .nth(1)
        .expect("Usage: transform_product <photo.jpg>");

    let config = StudioConfig::from_env();
    let studio = StudioController::new(Arc::new(config.gemini_provider()?));

    studio
        .select_image(&SelectedFile::from_path(input_path)?)
        .await?;

    match studio.generate().await {
        GenerateOutcome::Succeeded => {
            if let Some(path) = studio.download_result(&config.output_dir).await? {
                println!("Catalog image saved to {}", path.display());
            }
        }
        outcome => {
            println!(
                "No image ({outcome:?}): {}",
                studio.error_message().unwrap_or_default()
            );
        }
    }

    Ok(())
}
