//! Topic handlers for inbound scheduling events
//!
//! Each handler subscribes to one topic and owns the full treatment of one
//! event: parse the payload, schedule drafts, log the outcome. Handlers know
//! nothing about how events reach them, so they can be driven by any
//! dispatcher (or called directly in tests).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::error::{CrosscastError, Result};
use crate::scheduler::Scheduler;
use crate::types::{ContentBundle, LinkedInPost, ScheduleEvent, TwitterThread};

/// Topic carrying Twitter-only events, `content` is a [`TwitterThread`].
pub const TWITTER_TOPIC: &str = "twitter-schedule";
/// Topic carrying LinkedIn-only events, `content` is a [`LinkedInPost`].
pub const LINKEDIN_TOPIC: &str = "linkedin-schedule";
/// Topic carrying combined events, `content` is a [`ContentBundle`].
pub const CONTENT_TOPIC: &str = "schedule-content";

/// Every topic crosscast subscribes to.
pub const TOPICS: [&str; 3] = [TWITTER_TOPIC, LINKEDIN_TOPIC, CONTENT_TOPIC];

/// A handler subscribed to one topic. Payloads arrive as raw JSON from the
/// surrounding runtime; each handler parses its own content shape.
#[async_trait]
pub trait Handler: Send + Sync {
    fn topic(&self) -> &'static str;

    async fn handle(&self, payload: serde_json::Value) -> Result<()>;
}

/// Build the handler subscribed to `topic`, if crosscast knows it.
pub fn for_topic(topic: &str, scheduler: Scheduler) -> Option<Box<dyn Handler>> {
    match topic {
        TWITTER_TOPIC => Some(Box::new(TwitterScheduleHandler::new(scheduler))),
        LINKEDIN_TOPIC => Some(Box::new(LinkedInScheduleHandler::new(scheduler))),
        CONTENT_TOPIC => Some(Box::new(ScheduleContentHandler::new(scheduler))),
        _ => None,
    }
}

/// Parse an event payload. Schema violations become
/// [`CrosscastError::InvalidPayload`] before any scheduling starts.
pub fn parse_event<C: DeserializeOwned>(payload: serde_json::Value) -> Result<ScheduleEvent<C>> {
    serde_json::from_value(payload).map_err(|e| CrosscastError::InvalidPayload(e.to_string()))
}

/// Schedules the Twitter thread carried by `twitter-schedule` events.
pub struct TwitterScheduleHandler {
    scheduler: Scheduler,
}

impl TwitterScheduleHandler {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }
}

#[async_trait]
impl Handler for TwitterScheduleHandler {
    fn topic(&self) -> &'static str {
        TWITTER_TOPIC
    }

    async fn handle(&self, payload: serde_json::Value) -> Result<()> {
        let event: ScheduleEvent<TwitterThread> = parse_event(payload)?;
        match self.scheduler.schedule_thread(&event.content).await {
            Ok(draft) => {
                info!(
                    request_id = %event.request_id,
                    draft_url = draft.url().unwrap_or("unknown"),
                    "Twitter thread scheduled"
                );
                Ok(())
            }
            Err(e) => {
                error!(request_id = %event.request_id, error = %e, "Twitter thread scheduling failed");
                Err(e.into())
            }
        }
    }
}

/// Schedules the LinkedIn post carried by `linkedin-schedule` events.
pub struct LinkedInScheduleHandler {
    scheduler: Scheduler,
}

impl LinkedInScheduleHandler {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }
}

#[async_trait]
impl Handler for LinkedInScheduleHandler {
    fn topic(&self) -> &'static str {
        LINKEDIN_TOPIC
    }

    async fn handle(&self, payload: serde_json::Value) -> Result<()> {
        let event: ScheduleEvent<LinkedInPost> = parse_event(payload)?;
        match self.scheduler.schedule_post(&event.content).await {
            Ok(draft) => {
                info!(
                    request_id = %event.request_id,
                    draft_url = draft.url().unwrap_or("unknown"),
                    "LinkedIn post scheduled"
                );
                Ok(())
            }
            Err(e) => {
                error!(request_id = %event.request_id, error = %e, "LinkedIn post scheduling failed");
                Err(e.into())
            }
        }
    }
}

/// Schedules both channels of the bundle carried by `schedule-content`
/// events. The channels go out strictly in sequence and the first failure
/// aborts the event, so a Twitter failure leaves LinkedIn unattempted.
pub struct ScheduleContentHandler {
    scheduler: Scheduler,
}

impl ScheduleContentHandler {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }
}

#[async_trait]
impl Handler for ScheduleContentHandler {
    fn topic(&self) -> &'static str {
        CONTENT_TOPIC
    }

    async fn handle(&self, payload: serde_json::Value) -> Result<()> {
        let event: ScheduleEvent<ContentBundle> = parse_event(payload)?;
        match self.scheduler.schedule_bundle(&event.content).await {
            Ok((twitter, linkedin)) => {
                info!(
                    request_id = %event.request_id,
                    twitter_url = twitter.url().unwrap_or("unknown"),
                    linkedin_url = linkedin.url().unwrap_or("unknown"),
                    "content scheduling completed"
                );
                Ok(())
            }
            Err(e) => {
                error!(request_id = %event.request_id, error = %e, "content scheduling failed");
                Err(e.into())
            }
        }
    }
}
