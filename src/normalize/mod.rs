//! Listing normalizers.
//!
//! One normalizer per listing kind, all producing [`NormalizedEstate`]:
//! - `ApartmentNormalizer`: rooms, finishing, features, conditional prices
//! - `CommercialNormalizer`: offer-derived prices only
//! - `ParkingNormalizer`: hyphenated phase names, placeholder sections

mod apartment;
pub mod common;
mod commercial;
mod parking;

pub use apartment::ApartmentNormalizer;
pub use commercial::CommercialNormalizer;
pub use parking::ParkingNormalizer;

use crate::error::Result;
use crate::models::{EstateKind, NormalizedEstate, RawListing};
use crate::services::CommissioningIndex;

/// Read-only inputs shared by every normalizer in a run.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    /// Public site root, used for listing URLs
    pub site: &'a str,
    /// Region appended to the complex name
    pub region: &'a str,
    pub commissioning: &'a CommissioningIndex,
}

/// Pure `RawListing -> NormalizedEstate` conversion for one listing kind.
pub trait Normalizer {
    fn kind(&self) -> EstateKind;

    fn normalize(&self, listing: &RawListing) -> Result<NormalizedEstate>;

    /// Normalize in order; the first failing listing aborts the batch.
    fn normalize_all(&self, listings: &[RawListing]) -> Result<Vec<NormalizedEstate>> {
        listings
            .iter()
            .map(|listing| {
                self.normalize(listing).inspect_err(|e| {
                    log::error!("{} listing {} rejected: {e}", self.kind(), listing.id)
                })
            })
            .collect()
    }
}

/// Normalizer for a listing kind.
pub fn normalizer_for<'a>(kind: EstateKind, ctx: NormalizeContext<'a>) -> Box<dyn Normalizer + 'a> {
    match kind {
        EstateKind::Apartment => Box::new(ApartmentNormalizer::new(ctx)),
        EstateKind::Commercial => Box::new(CommercialNormalizer::new(ctx)),
        EstateKind::Parking => Box::new(ParkingNormalizer::new(ctx)),
    }
}
