// src/models/mod.rs

//! Domain models for the feed.
//!
//! Vendor payloads (`listing`), the normalized catalog record (`estate`) and
//! application configuration (`config`).

mod config;
mod estate;
mod listing;

// Re-export all public types
pub use config::{ApiConfig, AuthConfig, CatalogConfig, Config, LoggingConfig, OutputConfig};
pub use estate::{EstateKind, NormalizedEstate, Rooms, SaleStatus};
pub use listing::{
    Area, Calculated, CustomField, Discount, EndQuarter, House, HouseList, ListingPage,
    ListingPageData, PlanImage, Price, RawListing, SpecialOffer,
};
