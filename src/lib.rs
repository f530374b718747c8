// src/lib.rs

//! Estate Feed Library
//!
//! Pulls listings from a Profitbase catalog and normalizes them into flat
//! real-estate records.

pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
