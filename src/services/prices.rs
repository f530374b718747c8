// src/services/prices.rs

//! Price and discount extraction from a listing's offer payload.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::RawListing;

/// Prices derived from one listing; all amounts are exact decimals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceQuote {
    /// Nominal price; zero or missing is absent.
    pub base: Option<Decimal>,
    /// First offer's discounted price; absent without a base or when equal to it.
    pub sale: Option<Decimal>,
    /// `base - sale` when both are present.
    pub discount: Option<Decimal>,
    /// Only for offers expressed in percent.
    pub discount_percent: Option<Decimal>,
    /// Every offer as `"<name> <price>"`, joined with `"; "`.
    pub offers: Option<String>,
}

/// Resolve base and sale prices for a listing.
///
/// Only the first special offer feeds the discount fields.
pub fn resolve(listing: &RawListing) -> PriceQuote {
    let base = listing.price.value.filter(|price| !price.is_zero());
    let first = listing.special_offers.first();

    let sale = first
        .and_then(|offer| offer.discount.calculate.price)
        .map(|price| price.trunc())
        .and_then(|price| sale_against(base, price));

    let discount_percent = first.filter(|_| sale.is_some()).and_then(|offer| {
        let unit = offer.discount.unit.as_deref()?;
        let value = offer.discount.value.filter(|v| !v.is_zero())?;
        unit.eq_ignore_ascii_case("percent").then_some(value)
    });

    PriceQuote {
        base,
        sale,
        discount: discount(base, sale),
        discount_percent,
        offers: offer_summary(listing),
    }
}

/// A sale price only counts next to a different, non-zero base.
pub fn sale_against(base: Option<Decimal>, sale: Decimal) -> Option<Decimal> {
    let base = base?;
    (!sale.is_zero() && sale != base).then_some(sale)
}

/// `base - sale` when both are present.
pub fn discount(base: Option<Decimal>, sale: Option<Decimal>) -> Option<Decimal> {
    Some(base? - sale?)
}

fn offer_summary(listing: &RawListing) -> Option<String> {
    let parts: Vec<String> = listing
        .special_offers
        .iter()
        .map(|offer| {
            let price = offer
                .discount
                .calculate
                .price
                .map(|p| {
                    p.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
                        .to_string()
                })
                .unwrap_or_default();
            format!("{} {}", offer.name, price).trim().to_string()
        })
        .collect();

    (!parts.is_empty()).then(|| parts.join("; "))
}
