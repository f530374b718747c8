// src/services/commissioning.rs

//! House commissioning labels.
//!
//! Built once per run from the `house` endpoint and handed to normalizers
//! by reference.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{EndQuarter, House, HouseList};
use crate::utils::{ApiEndpoints, Transport};

/// Label for houses already handed over to buyers.
pub const HANDED_OVER: &str = "сдан";

const STATE_HANDED_OVER: &str = "HAND-OVER";
const STATE_UNFINISHED: &str = "UNFINISHED";

/// Read-only map from house id to its commissioning label.
#[derive(Debug, Clone, Default)]
pub struct CommissioningIndex {
    labels: HashMap<u64, Option<String>>,
}

impl CommissioningIndex {
    /// Fetch house metadata and build the index.
    pub fn build(
        transport: &dyn Transport,
        endpoints: &ApiEndpoints,
        token: &str,
    ) -> Result<Self> {
        let url = endpoints.house()?;
        let query = [("access_token".to_string(), token.to_string())];
        let response = transport.get_json(&url, &query)?;
        let houses: HouseList = serde_json::from_value(response)?;

        let index = Self::from_houses(&houses.data)?;
        log::info!("Commissioning index built for {} house(s)", index.len());
        Ok(index)
    }

    pub fn from_houses(houses: &[House]) -> Result<Self> {
        let mut labels = HashMap::with_capacity(houses.len());
        for house in houses {
            labels.insert(house.id, label(house)?);
        }
        Ok(Self { labels })
    }

    /// Label for a house; a house missing from the index is fatal.
    pub fn label_for(&self, house_id: u64, listing_id: u64) -> Result<Option<&str>> {
        self.labels
            .get(&house_id)
            .map(Option::as_deref)
            .ok_or(AppError::MissingCommissioning {
                house_id,
                listing_id,
            })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn label(house: &House) -> Result<Option<String>> {
    match (house.building_state.as_deref(), house.development_end_quarter) {
        (Some(STATE_HANDED_OVER), _) => Ok(Some(HANDED_OVER.to_string())),
        (Some(STATE_UNFINISHED), Some(end)) => format_quarter(end).map(Some),
        _ => Ok(None),
    }
}

/// `"III кв 2025"`.
fn format_quarter(end: EndQuarter) -> Result<String> {
    let roman = match end.quarter {
        1 => "I",
        2 => "II",
        3 => "III",
        4 => "IV",
        other => {
            return Err(AppError::validation(format!(
                "development end quarter {other} is out of range"
            )));
        }
    };
    Ok(format!("{roman} кв {}", end.year))
}
