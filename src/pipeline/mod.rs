//! Pipeline entry points for the feed.
//!
//! - `run_feed`: token, commissioning, fetch and normalize every listing kind
//! - `retain_priced`: drop records without any price

mod feed;
mod filter;

pub use feed::{FeedOutcome, KindSummary, run_feed};
pub use filter::retain_priced;
