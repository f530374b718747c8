// src/normalize/parking.rs

//! Storage and parking unit normalizer.

use crate::error::Result;
use crate::models::{EstateKind, NormalizedEstate, RawListing};
use crate::services::prices;

use super::common::{self, apply_quote, clean_section};
use super::{NormalizeContext, Normalizer};

/// Vendor placeholder for "no section".
const NO_SECTION: &str = "_";

pub struct ParkingNormalizer<'a> {
    ctx: NormalizeContext<'a>,
}

impl<'a> ParkingNormalizer<'a> {
    pub fn new(ctx: NormalizeContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Normalizer for ParkingNormalizer<'_> {
    fn kind(&self) -> EstateKind {
        EstateKind::Parking
    }

    fn normalize(&self, listing: &RawListing) -> Result<NormalizedEstate> {
        // Storage house names put the phase after a hyphen.
        let mut estate = common::base_estate(&self.ctx, listing, self.kind(), '-')?;
        estate.section = listing
            .section
            .as_deref()
            .filter(|s| s.trim() != NO_SECTION)
            .and_then(|s| clean_section(s, &["секция", "подъезд"]));
        apply_quote(&mut estate, prices::resolve(listing));
        Ok(estate)
    }
}
