//! Draft scheduling
//!
//! [`Scheduler`] flattens channel content and creates one Typefully draft per
//! channel. Combined scheduling runs Twitter first, then LinkedIn; the two
//! entry points differ in how they treat a mid-sequence failure.

use tracing::{error, info};

use crate::error::RemoteError;
use crate::format::{format_linkedin, format_twitter};
use crate::remote::typefully::{Draft, TypefullyClient};
use crate::types::{Channel, ChannelResult, ContentBundle, LinkedInPost, TwitterThread};

pub struct Scheduler {
    client: TypefullyClient,
}

impl Scheduler {
    pub fn new(client: TypefullyClient) -> Self {
        Self { client }
    }

    /// Flatten a Twitter thread and create one draft for it.
    pub async fn schedule_thread(&self, thread: &TwitterThread) -> Result<Draft, RemoteError> {
        info!(tweets = thread.len(), "scheduling Twitter thread");
        self.client.create_draft(&format_twitter(thread)).await
    }

    /// Create a draft for a LinkedIn post.
    pub async fn schedule_post(&self, post: &LinkedInPost) -> Result<Draft, RemoteError> {
        info!(chars = post.post.len(), "scheduling LinkedIn post");
        self.client.create_draft(&format_linkedin(post)).await
    }

    /// Schedule one channel out of a bundle.
    pub async fn schedule_channel(
        &self,
        channel: Channel,
        bundle: &ContentBundle,
    ) -> Result<Draft, RemoteError> {
        match channel {
            Channel::Twitter => self.schedule_thread(&bundle.twitter).await,
            Channel::LinkedIn => self.schedule_post(&bundle.linkedin).await,
        }
    }

    /// Schedule both channels strictly in sequence, Twitter first. The first
    /// failure aborts the sequence, so a Twitter failure means the LinkedIn
    /// draft is never attempted.
    pub async fn schedule_bundle(&self, bundle: &ContentBundle) -> Result<(Draft, Draft), RemoteError> {
        let twitter = self.schedule_thread(&bundle.twitter).await?;
        let linkedin = self.schedule_post(&bundle.linkedin).await?;
        Ok((twitter, linkedin))
    }

    /// Schedule both channels in sequence, recording a per-channel outcome
    /// instead of aborting on the first failure.
    pub async fn schedule_each(&self, bundle: &ContentBundle) -> Vec<ChannelResult> {
        let mut results = Vec::with_capacity(2);
        for channel in [Channel::Twitter, Channel::LinkedIn] {
            let result = match self.schedule_channel(channel, bundle).await {
                Ok(draft) => ChannelResult::ok(channel, draft.url().map(str::to_string)),
                Err(e) => {
                    error!(channel = %channel, error = %e, "channel scheduling failed");
                    ChannelResult::failed(channel, &e)
                }
            };
            results.push(result);
        }
        results
    }
}
