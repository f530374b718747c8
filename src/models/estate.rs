// src/models/estate.rs

//! Normalized catalog record.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::{AppError, Result};

/// Listing category, one per vendor property type alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstateKind {
    #[serde(rename = "flat")]
    Apartment,
    Commercial,
    #[serde(rename = "storeroom")]
    Parking,
}

impl EstateKind {
    /// Fetch and output order.
    pub const ALL: [EstateKind; 3] = [
        EstateKind::Apartment,
        EstateKind::Commercial,
        EstateKind::Parking,
    ];

    /// `propertyTypeAliases` value on the vendor side.
    pub fn alias(self) -> &'static str {
        match self {
            EstateKind::Apartment => "property",
            EstateKind::Commercial => "commercial_premises",
            EstateKind::Parking => "pantry",
        }
    }

    /// Catalog type tag.
    pub fn tag(self) -> &'static str {
        match self {
            EstateKind::Apartment => "flat",
            EstateKind::Commercial => "commercial",
            EstateKind::Parking => "storeroom",
        }
    }
}

impl fmt::Display for EstateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Vendor sale status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleStatus {
    Available,
    Booked,
    Sold,
}

impl SaleStatus {
    /// Parse the vendor enum; anything else is fatal.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "AVAILABLE" => Ok(SaleStatus::Available),
            "BOOKED" => Ok(SaleStatus::Booked),
            "SOLD" => Ok(SaleStatus::Sold),
            other => Err(AppError::UnknownStatus(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SaleStatus::Available => "Свободно",
            SaleStatus::Booked => "Забронировано",
            SaleStatus::Sold => "Продано",
        }
    }

    pub fn in_sale(self) -> bool {
        self != SaleStatus::Sold
    }
}

/// Room count, or a studio marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rooms {
    Studio,
    Count(u32),
}

impl Serialize for Rooms {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Rooms::Studio => serializer.serialize_str("studio"),
            Rooms::Count(n) => serializer.serialize_u32(*n),
        }
    }
}

/// One normalized unit, serialized with the catalog's key names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedEstate {
    // Identity and location
    pub complex: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<EstateKind>,
    pub phase: Option<String>,
    pub building: Option<String>,
    pub section: Option<String>,
    pub number: Option<String>,
    pub number_on_site: Option<String>,
    pub article: Option<String>,

    // Physical
    #[serde(with = "rust_decimal::serde::float_option")]
    pub area: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub living_area: Option<Decimal>,
    pub rooms: Option<Rooms>,
    pub floor: Option<i32>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub ceil: Option<Decimal>,
    pub plan: Option<String>,
    #[serde(serialize_with = "flag")]
    pub euro_planning: Option<bool>,

    // Commercial
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_base: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_finished: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_sale: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_finished_sale: Option<Decimal>,
    pub currency: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub discount_percent: Option<Decimal>,
    pub sale: Option<String>,
    #[serde(serialize_with = "flag")]
    pub finished: Option<bool>,
    pub finishing_name: Option<String>,
    #[serde(serialize_with = "flag")]
    pub furniture: Option<bool>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub furniture_price: Option<Decimal>,
    #[serde(serialize_with = "flag")]
    pub in_sale: Option<bool>,
    pub sale_status: Option<String>,
    #[serde(rename = "comissioning")]
    pub commissioning: Option<String>,
    #[serde(serialize_with = "flag")]
    pub cession: Option<bool>,

    // Descriptive
    pub feature: Option<Vec<String>>,
    pub view: Option<String>,
    pub comment: Option<String>,
    pub flat_url: Option<String>,
}

impl NormalizedEstate {
    pub fn new(kind: EstateKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Whether any of the four price fields carries a non-zero amount.
    pub fn has_price(&self) -> bool {
        [
            self.price_base,
            self.price_finished,
            self.price_sale,
            self.price_finished_sale,
        ]
        .iter()
        .flatten()
        .any(|price| !price.is_zero())
    }
}

/// Catalog flags are integers.
fn flag<S: Serializer>(value: &Option<bool>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_u8(u8::from(*v)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SaleStatus::parse("BOOKED").unwrap().label(), "Забронировано");
        assert!(SaleStatus::parse("AVAILABLE").unwrap().in_sale());
        assert!(!SaleStatus::parse("SOLD").unwrap().in_sale());
        assert!(matches!(
            SaleStatus::parse("RESERVED"),
            Err(AppError::UnknownStatus(s)) if s == "RESERVED"
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let mut estate = NormalizedEstate::new(EstateKind::Apartment);
        estate.rooms = Some(Rooms::Studio);
        estate.in_sale = Some(true);
        estate.price_base = Some(Decimal::new(450_000_050, 2));
        estate.commissioning = Some("сдан".into());

        let value = serde_json::to_value(&estate).unwrap();
        assert_eq!(value["type"], json!("flat"));
        assert_eq!(value["rooms"], json!("studio"));
        assert_eq!(value["in_sale"], json!(1));
        assert_eq!(value["price_base"], json!(4_500_000.5));
        assert_eq!(value["comissioning"], json!("сдан"));
        assert_eq!(value["price_sale"], json!(null));
        assert_eq!(value["finished"], json!(null));
    }

    #[test]
    fn test_has_price_ignores_zero() {
        let mut estate = NormalizedEstate::new(EstateKind::Parking);
        assert!(!estate.has_price());
        estate.price_base = Some(Decimal::ZERO);
        assert!(!estate.has_price());
        estate.price_finished_sale = Some(Decimal::from(10));
        assert!(estate.has_price());
    }
}
