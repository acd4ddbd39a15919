//! Core data types shared across crosscast
//!
//! The event and content shapes here are a wire contract with the
//! orchestration runtime that delivers scheduling events, so the serde
//! renames (camelCase keys, lowercase channels) are load-bearing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// One entry in a Twitter thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub content: String,
}

impl Tweet {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// An ordered Twitter thread. Order is thread order and must be preserved
/// all the way to the flattened payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterThread {
    pub thread: Vec<Tweet>,
}

impl TwitterThread {
    pub fn new(thread: Vec<Tweet>) -> Self {
        Self { thread }
    }

    pub fn len(&self) -> usize {
        self.thread.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thread.is_empty()
    }
}

/// A single LinkedIn post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInPost {
    pub post: String,
}

impl LinkedInPost {
    pub fn new(post: impl Into<String>) -> Self {
        Self { post: post.into() }
    }
}

/// Generated content for both channels, as carried by combined events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub twitter: TwitterThread,
    pub linkedin: LinkedInPost,
}

impl ContentBundle {
    pub fn new(twitter: TwitterThread, linkedin: LinkedInPost) -> Self {
        Self { twitter, linkedin }
    }
}

/// An inbound scheduling event.
///
/// `C` is the content shape the topic carries: [`TwitterThread`],
/// [`LinkedInPost`], or [`ContentBundle`]. `metadata` is opaque and passed
/// through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent<C> {
    pub request_id: String,
    pub url: Url,
    pub title: String,
    pub content: C,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A target platform for generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Twitter,
    LinkedIn,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Twitter => write!(f, "twitter"),
            Channel::LinkedIn => write!(f, "linkedin"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitter" => Ok(Channel::Twitter),
            "linkedin" => Ok(Channel::LinkedIn),
            _ => Err(format!(
                "unknown channel '{}' (expected twitter or linkedin)",
                s
            )),
        }
    }
}

/// Outcome of scheduling one channel, used for per-channel reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelResult {
    pub channel: Channel,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChannelResult {
    pub fn ok(channel: Channel, draft_url: Option<String>) -> Self {
        Self {
            channel,
            success: true,
            draft_url,
            error: None,
        }
    }

    pub fn failed(channel: Channel, error: impl ToString) -> Self {
        Self {
            channel,
            success: false,
            draft_url: None,
            error: Some(error.to_string()),
        }
    }
}
