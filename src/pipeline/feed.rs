// src/pipeline/feed.rs

//! Full fetch-and-normalize run.

use crate::error::Result;
use crate::models::{Config, EstateKind, NormalizedEstate};
use crate::normalize::{NormalizeContext, normalizer_for};
use crate::services::{CommissioningIndex, ListingFetcher, RetryPolicy, TokenAuthority};
use crate::utils::{ApiEndpoints, Transport};

use super::filter::retain_priced;

/// Per-kind counters for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSummary {
    pub kind: EstateKind,
    pub fetched: usize,
}

/// Output of one run.
#[derive(Debug, Clone)]
pub struct FeedOutcome {
    /// Priced records: apartments, then commercial, then parking.
    pub estates: Vec<NormalizedEstate>,
    pub kinds: Vec<KindSummary>,
    pub dropped: usize,
}

/// Run token → commissioning → fetch/normalize ×3 → filter.
///
/// Any error aborts the whole run; nothing partial is returned.
pub fn run_feed(config: &Config, transport: &dyn Transport) -> Result<FeedOutcome> {
    let endpoints = ApiEndpoints::from_config(&config.api)?;
    let total_steps = 2 + EstateKind::ALL.len();
    let mut step = 1;

    log::info!("[STEP {step}/{total_steps}] Acquiring access token");
    let policy = RetryPolicy::from(&config.auth);
    let token = TokenAuthority::new(transport, &endpoints, &config.api.site, policy).acquire()?;
    step += 1;

    log::info!("[STEP {step}/{total_steps}] Loading house commissioning");
    let commissioning = CommissioningIndex::build(transport, &endpoints, &token)?;
    step += 1;

    let ctx = NormalizeContext {
        site: &config.api.site,
        region: &config.catalog.region,
        commissioning: &commissioning,
    };
    let fetcher = ListingFetcher::new(transport, &endpoints, config.api.page_size);

    let mut estates = Vec::new();
    let mut kinds = Vec::with_capacity(EstateKind::ALL.len());
    for kind in EstateKind::ALL {
        log::info!("[STEP {step}/{total_steps}] Fetching {kind} listings");
        let listings = fetcher.fetch(&token, kind.alias(), &[])?;
        estates.extend(normalizer_for(kind, ctx).normalize_all(&listings)?);
        kinds.push(KindSummary {
            kind,
            fetched: listings.len(),
        });
        step += 1;
    }

    let normalized = estates.len();
    let estates = retain_priced(estates);
    let dropped = normalized - estates.len();

    log::info!("[SUMMARY] Feed run");
    for summary in &kinds {
        log::info!("    {}: {}", summary.kind, summary.fetched);
    }
    log::info!("    without price: {dropped}");
    log::info!("    exported: {}", estates.len());

    Ok(FeedOutcome {
        estates,
        kinds,
        dropped,
    })
}
