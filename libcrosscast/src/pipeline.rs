//! End-to-end content pipeline
//!
//! Drives the whole flow for one article URL: scrape it, generate channel
//! content, schedule drafts. Scraping and generation failures abort the run;
//! scheduling failures are recorded per channel so one bad channel does not
//! hide the other's draft.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::remote::firecrawl::{Article, FirecrawlClient};
use crate::remote::openai::OpenAiClient;
use crate::remote::typefully::TypefullyClient;
use crate::scheduler::Scheduler;
use crate::types::{ChannelResult, ContentBundle, ScheduleEvent};

/// Outcome of one pipeline run.
#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineReport {
    pub request_id: String,
    pub title: String,
    pub url: Url,
    pub channels: Vec<ChannelResult>,
}

impl PipelineReport {
    pub fn all_succeeded(&self) -> bool {
        self.channels.iter().all(|c| c.success)
    }
}

pub struct ContentPipeline {
    firecrawl: FirecrawlClient,
    openai: OpenAiClient,
    scheduler: Scheduler,
}

impl ContentPipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            firecrawl: FirecrawlClient::new(&config.firecrawl),
            openai: OpenAiClient::new(&config.openai),
            scheduler: Scheduler::new(TypefullyClient::new(&config.typefully)),
        }
    }

    /// Scrape an article and generate content for both channels, producing
    /// the combined event that scheduling consumes. Creates no drafts.
    ///
    /// The two generation calls run concurrently.
    pub async fn generate(&self, url: &Url) -> Result<ScheduleEvent<ContentBundle>> {
        let request_id = Uuid::new_v4().to_string();
        info!(request_id = %request_id, url = %url, "starting content generation");

        let article = self.firecrawl.scrape(url).await?;

        let (twitter, linkedin) = tokio::try_join!(
            self.openai
                .generate_twitter_thread(&article.title, &article.content),
            self.openai
                .generate_linkedin_post(&article.title, &article.content),
        )?;
        info!(request_id = %request_id, tweets = twitter.len(), "content generated");

        Ok(build_event(
            request_id,
            article,
            ContentBundle::new(twitter, linkedin),
        ))
    }

    /// Run the full pipeline: scrape, generate, then schedule every channel.
    pub async fn run(&self, url: &Url) -> Result<PipelineReport> {
        let event = self.generate(url).await?;
        let channels = self.scheduler.schedule_each(&event.content).await;

        Ok(PipelineReport {
            request_id: event.request_id,
            title: event.title,
            url: event.url,
            channels,
        })
    }
}

fn build_event(
    request_id: String,
    article: Article,
    content: ContentBundle,
) -> ScheduleEvent<ContentBundle> {
    let metadata = serde_json::json!({
        "generatedAt": Utc::now().to_rfc3339(),
        "originalUrl": article.url.as_str(),
    });

    ScheduleEvent {
        request_id,
        url: article.url,
        title: article.title,
        content,
        metadata: Some(metadata),
    }
}
