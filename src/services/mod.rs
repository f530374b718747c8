//! Service layer for the feed.
//!
//! This module contains the vendor-facing and pricing logic:
//! - Token acquisition (`TokenAuthority`)
//! - House commissioning labels (`CommissioningIndex`)
//! - Paginated listing retrieval (`ListingFetcher`)
//! - Price and discount resolution (`prices`)
//! - Apartment feature classification (`features`)

mod auth;
mod commissioning;
pub mod features;
mod listings;
pub mod prices;

pub use auth::{RetryPolicy, TokenAuthority};
pub use commissioning::{CommissioningIndex, HANDED_OVER};
pub use features::{Classification, FeatureRule, FeatureTag};
pub use listings::ListingFetcher;
pub use prices::PriceQuote;
