// src/normalize/common.rs

//! Steps shared by all three normalizers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::models::{EstateKind, NormalizedEstate, RawListing, SaleStatus};
use crate::services::PriceQuote;

use super::NormalizeContext;

/// Phase marker inside a house name: `2 очередь`, `3-я очередь`, `1 этап`, `очередь 2`.
static PHASE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:(\d+)\s*(?:-?я\s+)?)?(?:очередь|этап)(?:\s*№?\s*(\d+))?")
        .expect("phase marker pattern")
});

/// `дом` prefix and number sign in building names.
static BUILDING_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)дом|№").expect("building noise pattern"));

/// Finishing values meaning "no finishing".
static NOT_FINISHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)без |нет").expect("finishing pattern"));

/// Phase and building parsed out of a vendor house name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseName {
    pub phase: Option<String>,
    pub building: Option<String>,
}

/// Split a house name into phase and building.
///
/// Segments are separated by `delimiter`. The first segment carrying a phase
/// marker yields the phase digits; the rest of the name is the building.
pub fn split_house_name(name: &str, delimiter: char) -> HouseName {
    let mut phase = None;
    let mut rest: Vec<String> = Vec::new();

    for segment in name.split(delimiter) {
        if phase.is_none() {
            if let Some(caps) = PHASE_MARKER.captures(segment) {
                let marker = caps.get(0).map_or("", |m| m.as_str());
                let leftover = segment.replacen(marker, "", 1);
                match caps.get(1).or_else(|| caps.get(2)) {
                    Some(digits) => {
                        phase = Some(digits.as_str().to_string());
                        rest.push(leftover);
                    }
                    // "I очередь": whatever sits next to the marker is the phase.
                    None => phase = non_empty(&leftover),
                }
                continue;
            }
        }
        rest.push(segment.to_string());
    }

    HouseName {
        phase,
        building: clean_building(&rest.join(&delimiter.to_string())),
    }
}

fn clean_building(value: &str) -> Option<String> {
    let stripped = BUILDING_NOISE.replace_all(value, "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    non_empty(collapsed.trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '-'))
}

/// Lower-case a section label and drop the given words.
pub fn clean_section(value: &str, words: &[&str]) -> Option<String> {
    let mut section = value.to_lowercase();
    for word in words {
        section = section.replace(word, "");
    }
    non_empty(&section)
}

/// `"<project> (<region>)"`.
pub fn complex_name(project: &str, region: &str) -> String {
    format!("{} ({})", project.trim(), region)
}

/// Finished flag and finishing name from the `facing` attribute.
pub fn finishing(listing: &RawListing) -> (Option<bool>, Option<String>) {
    let Some(facing) = listing.custom_field("facing").filter(|f| f.has_value()) else {
        return (None, None);
    };
    let value = facing.text();
    let finished = !NOT_FINISHED.is_match(&value);
    (Some(finished), finished.then_some(value))
}

pub fn listing_url(site: &str, listing: &RawListing) -> String {
    format!(
        "{site}#/profitbase/house/{}/list?propertyId={}",
        listing.house_id, listing.id
    )
}

/// Fields every listing kind fills the same way.
pub fn base_estate(
    ctx: &NormalizeContext<'_>,
    listing: &RawListing,
    kind: EstateKind,
    delimiter: char,
) -> Result<NormalizedEstate> {
    let status = SaleStatus::parse(&listing.status)?;
    let house = split_house_name(&listing.house_name, delimiter);

    let mut estate = NormalizedEstate::new(kind);
    estate.complex = Some(complex_name(&listing.project_name, ctx.region));
    estate.phase = house.phase;
    estate.building = house.building;
    estate.number = listing.number.as_deref().and_then(non_empty);
    estate.number_on_site = Some(listing.id.to_string());
    estate.article = listing
        .custom_field("code")
        .filter(|f| f.has_value())
        .map(|f| f.text());
    estate.floor = listing.floor;
    estate.area = listing.area.area_total;
    estate.plan = listing.plan_images.first().map(|p| p.source.clone());
    estate.in_sale = Some(status.in_sale());
    estate.sale_status = Some(status.label().to_string());
    estate.commissioning = ctx
        .commissioning
        .label_for(listing.house_id, listing.id)?
        .map(str::to_string);
    estate.flat_url = Some(listing_url(ctx.site, listing));
    Ok(estate)
}

/// Route an offer-derived quote into the unfinished price fields.
pub fn apply_quote(estate: &mut NormalizedEstate, quote: PriceQuote) {
    estate.price_base = quote.base;
    estate.price_sale = quote.sale;
    estate.discount = quote.discount;
    estate.discount_percent = quote.discount_percent;
    estate.sale = quote.offers;
}

pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
