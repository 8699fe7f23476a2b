//! SEC EDGAR company facts access.
//!
//! This module provides:
//! - The company facts document model ([`CompanyFacts`])
//! - An HTTP client for the XBRL `companyfacts` endpoint ([`EdgarClient`])
//! - The [`FactsSource`] seam used by the pipeline, so tests can stub the network
//! - Latest-value extraction of a metric whitelist ([`MetricExtractor`])
//!
//! # Example
//!
//! ```no_run
//! use factsheet_data::Cik;
//! use factsheet_data::edgar::{EdgarClient, MetricExtractor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new()?;
//!     let cik = Cik::parse("320193")?;
//!     let facts = client.fetch_company_facts(&cik).await?;
//!
//!     for record in MetricExtractor::default().extract(&cik, Some(&facts)) {
//!         println!("{} {} (ended {})", record.metric, record.value, record.end);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod extract;
pub mod facts;

pub use client::{
    CIK_PLACEHOLDER, DEFAULT_ENDPOINT_TEMPLATE, DEFAULT_USER_AGENT, EdgarClient, FactsSource,
};
pub use extract::{
    DEFAULT_METRICS, DEFAULT_REPORTING_UNIT, MetricExtractor, MetricRecord, latest_observation,
};
pub use facts::{CompanyFacts, Observation, US_GAAP};
