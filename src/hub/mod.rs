//! IMEC Hub API integration module.
//!
//! Provides the search client and the record types it returns.

pub mod client;
pub mod models;

pub use client::HubClient;
pub use models::{Category, SearchResultItem};
