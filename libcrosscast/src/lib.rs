//! Crosscast - turn one article into scheduled social drafts
//!
//! This library provides core functionality for scraping an article,
//! generating Twitter and LinkedIn content for it, and parking the results
//! as reviewable drafts in a scheduling service.

pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod logging;
pub mod pipeline;
pub mod remote;
pub mod scheduler;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, CrosscastError, RemoteError, Result};
pub use pipeline::{ContentPipeline, PipelineReport};
pub use scheduler::Scheduler;
pub use types::{
    Channel, ChannelResult, ContentBundle, LinkedInPost, ScheduleEvent, Tweet, TwitterThread,
};
