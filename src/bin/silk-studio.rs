//! CLI for Silk Studio - product photo to catalog shot.

use clap::{Args, Parser, Subcommand};
use silk_studio::{
    GenerateOutcome, ImageProvider, SelectedFile, StudioConfig, StudioController, CATALOG_PROMPT,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "silk-studio")]
#[command(about = "Turn a product photo into a studio catalog shot via Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Gemini model identifier (overrides SILK_STUDIO_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a photo, generate the catalog shot and download it
    Generate(GenerateArgs),

    /// Check that the service is reachable and the API key is accepted
    Check,

    /// Print the instruction sent with every photo
    Prompt,
}

#[derive(Args)]
struct GenerateArgs {
    /// Product photo (png, jpg, webp)
    input: PathBuf,

    /// Directory to save silk-studio-result.png into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Declared MIME type, when the extension does not say it
    #[arg(long)]
    mime: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "silk_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = StudioConfig::from_env();
    if cli.model.is_some() {
        config.model = cli.model.clone();
    }

    match cli.command {
        Commands::Generate(args) => generate(args, config, cli.json).await?,
        Commands::Check => check(config, cli.json).await?,
        Commands::Prompt => print_prompt(cli.json)?,
    }

    Ok(())
}

async fn generate(
    args: GenerateArgs,
    config: StudioConfig,
    json_output: bool,
) -> anyhow::Result<()> {
    let file = match args.mime {
        Some(mime) => SelectedFile::new(&args.input, mime),
        None => SelectedFile::from_path(&args.input)?,
    };
    let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());

    let provider = config.gemini_provider()?;
    let studio = StudioController::new(Arc::new(provider));

    studio.select_image(&file).await?;

    let outcome = studio.generate().await;
    let saved = match outcome {
        GenerateOutcome::Succeeded => studio.download_result(&output_dir).await?,
        _ => None,
    };
    let state = studio.snapshot();

    if json_output {
        let result = serde_json::json!({
            "success": saved.is_some(),
            "status": state.status().as_str(),
            "error": state.error_message(),
            "input": args.input.display().to_string(),
            "output": saved.as_ref().map(|p| p.display().to_string()),
            "size_bytes": state.result().map(|r| r.size()),
            "mime_type": state.result().map(|r| r.mime_type()),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(ref path) = saved {
        println!(
            "Generated catalog image: {} ({} bytes)",
            path.display(),
            state.result().map(|r| r.size()).unwrap_or_default()
        );
    }

    match saved {
        Some(_) => Ok(()),
        None => anyhow::bail!(
            "{}",
            state
                .error_message()
                .unwrap_or(silk_studio::FALLBACK_MESSAGE)
        ),
    }
}

async fn check(config: StudioConfig, json_output: bool) -> anyhow::Result<()> {
    let provider = config.gemini_provider()?;
    let result = provider.health_check().await;

    if json_output {
        let body = serde_json::json!({
            "provider": provider.kind().to_string(),
            "model": provider.model().as_str(),
            "ok": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.user_message()),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else if result.is_ok() {
        println!("{} ({}): ok", provider.name(), provider.model().as_str());
    }

    result?;
    Ok(())
}

fn print_prompt(json_output: bool) -> anyhow::Result<()> {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "prompt": CATALOG_PROMPT }))?
        );
    } else {
        println!("{CATALOG_PROMPT}");
    }
    Ok(())
}
