// src/models/listing.rs

//! Vendor-shaped listing and house payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One sellable unit as returned by the `property` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListing {
    pub id: u64,

    pub house_id: u64,

    #[serde(rename = "projectName", default)]
    pub project_name: String,

    #[serde(rename = "houseName", default)]
    pub house_name: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub number: Option<String>,

    #[serde(default)]
    pub section: Option<String>,

    #[serde(rename = "sectionName", default)]
    pub section_name: Option<String>,

    #[serde(default)]
    pub floor: Option<i32>,

    #[serde(default)]
    pub studio: Option<bool>,

    #[serde(default)]
    pub rooms_amount: Option<u32>,

    pub status: String,

    #[serde(default)]
    pub area: Area,

    #[serde(default)]
    pub price: Price,

    #[serde(rename = "planImages", default)]
    pub plan_images: Vec<PlanImage>,

    #[serde(default)]
    pub custom_fields: Vec<CustomField>,

    #[serde(rename = "specialOffers", default)]
    pub special_offers: Vec<SpecialOffer>,
}

impl RawListing {
    /// First custom field with the given id.
    pub fn custom_field(&self, id: &str) -> Option<&CustomField> {
        self.custom_fields
            .iter()
            .find(|f| f.id.as_deref() == Some(id))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Area {
    #[serde(default)]
    pub area_total: Option<Decimal>,
    #[serde(default)]
    pub area_living: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub value: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanImage {
    pub source: String,
}

/// Vendor-defined free-text attribute.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomField {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub value: Value,
}

impl CustomField {
    /// Whether the value carries anything (non-null, non-empty, non-zero, true).
    pub fn has_value(&self) -> bool {
        match &self.value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }

    /// The value rendered as text; list values are joined with ", ".
    pub fn text(&self) -> String {
        match &self.value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }
}

/// Promotional discount attached to a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialOffer {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub discount: Discount,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Discount {
    /// `percent` or an absolute unit
    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub value: Option<Decimal>,

    #[serde(default)]
    pub calculate: Calculated,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Calculated {
    /// Listing price after the discount
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// House metadata from the `house` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct House {
    pub id: u64,

    #[serde(rename = "buildingState", default)]
    pub building_state: Option<String>,

    #[serde(rename = "developmentEndQuarter", default)]
    pub development_end_quarter: Option<EndQuarter>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EndQuarter {
    pub quarter: u8,
    pub year: i32,
}

/// `data` envelope of a `property` page.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    pub data: ListingPageData,
}

#[derive(Debug, Deserialize)]
pub struct ListingPageData {
    #[serde(rename = "filteredCount", deserialize_with = "count")]
    pub filtered_count: usize,

    #[serde(default)]
    pub properties: Vec<RawListing>,
}

/// `data` envelope of the `house` endpoint.
#[derive(Debug, Deserialize)]
pub struct HouseList {
    pub data: Vec<House>,
}

/// Accepts `"12"`, `12` or `null`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// The vendor reports counts either as numbers or numeric strings.
fn count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| D::Error::custom(format!("invalid count {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid count '{s}'"))),
        other => Err(D::Error::custom(format!("invalid count {other}"))),
    }
}
