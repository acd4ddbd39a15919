//! Pure content formatting
//!
//! Flattens structured channel content into the single string the
//! scheduling vendor accepts. No I/O here.

use crate::types::{LinkedInPost, TwitterThread};

/// Separator between tweets in a flattened thread. The vendor splits drafts
/// into thread entries on exactly four consecutive newlines.
pub const TWEET_SEPARATOR: &str = "\n\n\n\n";

/// Flatten a Twitter thread into one draft body, joining tweet bodies with
/// [`TWEET_SEPARATOR`] in thread order. Tweet text is taken verbatim, no
/// trimming or reflowing.
pub fn format_twitter(thread: &TwitterThread) -> String {
    thread
        .thread
        .iter()
        .map(|tweet| tweet.content.as_str())
        .collect::<Vec<_>>()
        .join(TWEET_SEPARATOR)
}

/// A LinkedIn post is already a single body, return it unchanged.
pub fn format_linkedin(post: &LinkedInPost) -> String {
    post.post.clone()
}
