// src/normalize/commercial.rs

//! Commercial premises normalizer.

use crate::error::Result;
use crate::models::{EstateKind, NormalizedEstate, RawListing};
use crate::services::prices;

use super::common::{self, apply_quote, clean_section};
use super::{NormalizeContext, Normalizer};

pub struct CommercialNormalizer<'a> {
    ctx: NormalizeContext<'a>,
}

impl<'a> CommercialNormalizer<'a> {
    pub fn new(ctx: NormalizeContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Normalizer for CommercialNormalizer<'_> {
    fn kind(&self) -> EstateKind {
        EstateKind::Commercial
    }

    fn normalize(&self, listing: &RawListing) -> Result<NormalizedEstate> {
        let mut estate = common::base_estate(&self.ctx, listing, self.kind(), ',')?;
        estate.section = listing
            .section_name
            .as_deref()
            .and_then(|s| clean_section(s, &["секция"]));
        apply_quote(&mut estate, prices::resolve(listing));
        Ok(estate)
    }
}
