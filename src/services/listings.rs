// src/services/listings.rs

//! Paginated listing retrieval.

use crate::error::{AppError, Result};
use crate::models::{ListingPage, RawListing};
use crate::utils::{ApiEndpoints, Transport};

/// Walks the `property` endpoint page by page until `filteredCount` is reached.
pub struct ListingFetcher<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a ApiEndpoints,
    page_size: usize,
}

impl<'a> ListingFetcher<'a> {
    pub fn new(transport: &'a dyn Transport, endpoints: &'a ApiEndpoints, page_size: usize) -> Self {
        Self {
            transport,
            endpoints,
            page_size: page_size.max(1),
        }
    }

    /// Fetch every available listing of one property type alias.
    ///
    /// `extra_filters` override or extend the default query parameters.
    pub fn fetch(
        &self,
        token: &str,
        alias: &str,
        extra_filters: &[(String, String)],
    ) -> Result<Vec<RawListing>> {
        let url = self.endpoints.property()?;
        let step = self.step(extra_filters)?;
        let mut listings: Vec<RawListing> = Vec::new();
        let mut offset = 0usize;
        let mut total: Option<usize> = None;

        loop {
            let query = self.query(token, alias, offset, extra_filters);
            let response = self.transport.get_json(&url, &query)?;
            let page: ListingPage = serde_json::from_value(response)?;

            // The first page's count is authoritative.
            let expected = *total.get_or_insert(page.data.filtered_count);
            let received = page.data.properties.len();
            log::debug!(
                "'{alias}' offset {offset}: {received} listing(s), {expected} expected in total"
            );

            if received == 0 && listings.len() < expected {
                return Err(AppError::StalledPagination {
                    alias: alias.to_string(),
                    offset,
                    fetched: listings.len(),
                    expected,
                });
            }

            listings.extend(page.data.properties);
            offset += step;

            if listings.len() >= expected {
                break;
            }
        }

        log::info!("Fetched {} '{alias}' listing(s)", listings.len());
        Ok(listings)
    }

    /// Offset increment: the effective `limit`, which a filter may override.
    fn step(&self, extra_filters: &[(String, String)]) -> Result<usize> {
        let mut step = self.page_size;
        for (key, value) in extra_filters {
            match key.as_str() {
                "offset" => {
                    return Err(AppError::validation(
                        "'offset' is managed by the listing fetcher",
                    ));
                }
                "limit" => {
                    step = value
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .filter(|limit| *limit > 0)
                        .ok_or_else(|| {
                            AppError::validation(format!("invalid listing limit '{value}'"))
                        })?;
                }
                _ => {}
            }
        }
        Ok(step)
    }

    fn query(
        &self,
        token: &str,
        alias: &str,
        offset: usize,
        extra_filters: &[(String, String)],
    ) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = [
            ("propertyTypeAliases[0]", alias.to_string()),
            ("isHouseFinished", "0".to_string()),
            ("status[0]", "AVAILABLE".to_string()),
            ("access_token", token.to_string()),
            ("order[property_id]", "asc".to_string()),
            ("limit", self.page_size.to_string()),
            ("offset", offset.to_string()),
            ("full", "true".to_string()),
            ("returnFilteredCount", "true".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        for (key, value) in extra_filters {
            match params.iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value.clone(),
                None => params.push((key.clone(), value.clone())),
            }
        }
        params
    }
}
