//! cross-schedule - Run a scheduling event handler on a JSON payload
//!
//! Takes one event payload, hands it to the handler subscribed to the chosen
//! topic, and exits. Acts as the manual stand-in for the event runtime that
//! normally delivers these payloads.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use libcrosscast::handlers::{self, CONTENT_TOPIC, TOPICS};
use libcrosscast::logging::{self, LogFormat};
use libcrosscast::remote::typefully::TypefullyClient;
use libcrosscast::scheduler::Scheduler;
use libcrosscast::{Config, CrosscastError, Result};

#[derive(Parser, Debug)]
#[command(name = "cross-schedule")]
#[command(version)]
#[command(about = "Run a scheduling event handler on a JSON payload")]
#[command(long_about = "\
cross-schedule - Run a scheduling event handler on a JSON payload

DESCRIPTION:
    cross-schedule feeds one event payload to the handler subscribed to
    the chosen topic, creating Typefully drafts exactly as the event
    runtime would. Useful for replaying events and for smoke-testing
    credentials. Success is silent.

TOPICS:
    twitter-schedule    content is {\"thread\": [{\"content\": \"...\"}]}
    linkedin-schedule   content is {\"post\": \"...\"}
    schedule-content    content carries both channels (default)

USAGE EXAMPLES:
    # Replay a captured combined event
    cross-schedule event.json

    # Pipe a Twitter-only payload
    cat tweet-event.json | cross-schedule --topic twitter-schedule

ENVIRONMENT:
    FIRECRAWL_API_KEY     (required) Firecrawl API key
    TYPEFULLY_API_KEY     (required) Typefully API key
    OPENAI_API_KEY        (required) OpenAI API key
    TYPEFULLY_API_URL     Override the Typefully endpoint
    CROSSCAST_LOG_FORMAT  text, json, or pretty (default: text)
    CROSSCAST_LOG_LEVEL   Log filter when RUST_LOG is unset (default: info)

EXIT CODES:
    0 - Drafts created
    1 - Scheduling failure
    2 - Authentication error
    3 - Invalid input

For more information, visit: https://github.com/crosscast/crosscast
")]
struct Cli {
    /// Event payload file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Topic whose handler should process the payload
    #[arg(short, long, default_value = CONTENT_TOPIC)]
    topic: String,

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

    let scheduler = Scheduler::new(TypefullyClient::new(&config.typefully));
    let handler = handlers::for_topic(&cli.topic, scheduler).ok_or_else(|| {
        CrosscastError::InvalidPayload(format!(
            "unknown topic '{}' (known topics: {})",
            cli.topic,
            TOPICS.join(", ")
        ))
    })?;

    let payload = read_payload(cli.file)?;
    handler.handle(payload).await?;

    // Silent success, drafts are waiting in Typefully.
    Ok(())
}

fn read_payload(file: Option<PathBuf>) -> Result<serde_json::Value> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path).map_err(|e| {
            CrosscastError::InvalidPayload(format!("failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(|e| {
                CrosscastError::InvalidPayload(format!("failed to read payload from stdin: {}", e))
            })?;
            buf
        }
    };

    serde_json::from_str(&raw)
        .map_err(|e| CrosscastError::InvalidPayload(format!("payload is not valid JSON: {}", e)))
}
