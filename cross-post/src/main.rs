//! cross-post - Generate and schedule social drafts from an article URL
//!
//! Runs the full pipeline: scrape the article, generate Twitter and LinkedIn
//! content, park both as Typefully drafts, then print a per-channel report.

use clap::Parser;
use libcrosscast::logging::{self, LogFormat};
use libcrosscast::pipeline::{ContentPipeline, PipelineReport};
use libcrosscast::{Config, CrosscastError, RemoteError, Result};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "cross-post")]
#[command(version)]
#[command(about = "Generate and schedule social drafts from an article URL")]
#[command(long_about = "\
cross-post - Generate and schedule social drafts from an article URL

DESCRIPTION:
    cross-post scrapes one article, generates a Twitter thread and a
    LinkedIn post for it, and creates both as unpublished Typefully
    drafts for manual review. Nothing is auto-published.

    Each channel is reported separately; a failed channel does not stop
    the other, but the process exits non-zero if any channel failed.

USAGE EXAMPLES:
    # Schedule drafts for an article
    cross-post https://example.com/article

    # Read the URL from stdin
    echo https://example.com/article | cross-post

    # Generate content without creating drafts
    cross-post --dry-run https://example.com/article

    # Machine-readable report
    cross-post --format json https://example.com/article

ENVIRONMENT:
    FIRECRAWL_API_KEY     (required) Firecrawl API key
    TYPEFULLY_API_KEY     (required) Typefully API key
    OPENAI_API_KEY        (required) OpenAI API key
    FIRECRAWL_API_URL     Override the Firecrawl endpoint
    TYPEFULLY_API_URL     Override the Typefully endpoint
    OPENAI_API_URL        Override the OpenAI endpoint
    OPENAI_MODEL          Generation model (default: gpt-4o)
    CROSSCAST_LOG_FORMAT  text, json, or pretty (default: text)
    CROSSCAST_LOG_LEVEL   Log filter when RUST_LOG is unset (default: info)

EXIT CODES:
    0 - All drafts created
    1 - Scheduling or pipeline failure
    2 - Authentication error
    3 - Invalid input

For more information, visit: https://github.com/crosscast/crosscast
")]
struct Cli {
    /// Article URL (reads from stdin if not provided)
    url: Option<String>,

    /// Generate content and print the scheduling event without creating drafts
    #[arg(long)]
    dry_run: bool,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        logging::init(LogFormat::Text, "debug");
    } else {
        logging::init_default();
    }

    // Run the main logic and handle errors
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;

    if cli.format != "text" && cli.format != "json" {
        return Err(CrosscastError::InvalidPayload(format!(
            "unknown output format '{}' (expected text or json)",
            cli.format
        )));
    }

    let url = resolve_url(cli.url)?;
    let pipeline = ContentPipeline::from_config(&config);

    if cli.dry_run {
        let event = pipeline.generate(&url).await?;
        let rendered = serde_json::to_string_pretty(&event)
            .map_err(|e| CrosscastError::InvalidPayload(format!("event not encodable: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    let report = pipeline.run(&url).await?;

    match cli.format.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&report).map_err(|e| {
                CrosscastError::InvalidPayload(format!("report not encodable: {}", e))
            })?;
            println!("{}", rendered);
        }
        _ => print!("{}", render_text(&report)),
    }

    let failed = report.channels.iter().filter(|c| !c.success).count();
    if failed > 0 {
        return Err(RemoteError::Rejected(format!(
            "{} of {} channels failed",
            failed,
            report.channels.len()
        ))
        .into());
    }

    Ok(())
}

/// Take the URL from the argument or the first line of stdin.
fn resolve_url(arg: Option<String>) -> Result<Url> {
    let raw = match arg {
        Some(s) => s,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_line(&mut buf).map_err(|e| {
                CrosscastError::InvalidPayload(format!("failed to read URL from stdin: {}", e))
            })?;
            buf
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CrosscastError::InvalidPayload(
            "no URL provided".to_string(),
        ));
    }

    Url::parse(trimmed)
        .map_err(|e| CrosscastError::InvalidPayload(format!("invalid URL '{}': {}", trimmed, e)))
}

fn render_text(report: &PipelineReport) -> String {
    let mut out = format!("{} ({})\n", report.title, report.request_id);
    for result in &report.channels {
        match &result.error {
            None => {
                let draft = result.draft_url.as_deref().unwrap_or("draft created");
                out.push_str(&format!("  {}: {}\n", result.channel, draft));
            }
            Some(error) => {
                out.push_str(&format!("  {}: FAILED: {}\n", result.channel, error));
            }
        }
    }
    out
}
