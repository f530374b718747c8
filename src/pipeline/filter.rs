// src/pipeline/filter.rs

//! Drops records that carry no price.

use crate::models::NormalizedEstate;

/// Keep only priced records, preserving order.
pub fn retain_priced(estates: Vec<NormalizedEstate>) -> Vec<NormalizedEstate> {
    let before = estates.len();
    let kept: Vec<NormalizedEstate> = estates.into_iter().filter(|e| e.has_price()).collect();

    let dropped = before - kept.len();
    if dropped > 0 {
        log::info!("Dropped {dropped} record(s) without a price");
    }
    kept
}
