//! The fetch-and-extract pipeline.
//!
//! For every identifier, strictly in sequence: wait the courtesy delay, fetch
//! the company facts, extract the metric records and append them to the run's
//! results. A company whose facts are unavailable contributes no records and
//! does not stop the run.

use crate::config::PipelineConfig;
use crate::input::{InputError, load_ciks};
use factsheet_data::Cik;
use factsheet_data::edgar::{FactsSource, MetricExtractor, MetricRecord};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// Progress notification sent after each identifier is processed.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Zero-based position of the identifier
    pub index: usize,
    /// Number of identifiers in the run
    pub total: usize,
    /// Identifier just processed
    pub cik: &'a Cik,
    /// Whether facts were available
    pub available: bool,
    /// Records extracted for this identifier
    pub records: usize,
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Identifiers processed
    pub identifiers: usize,
    /// Identifiers whose facts could not be fetched
    pub unavailable: usize,
    /// Identifiers that produced at least one record
    pub companies_with_records: usize,
    /// Total records extracted
    pub records: usize,
}

/// Records and counts of a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    /// Extracted records, grouped by identifier in processing order
    pub records: Vec<MetricRecord>,
    /// Run counts
    pub summary: RunSummary,
}

impl PipelineOutput {
    /// True if the run produced nothing to show or export.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct identifiers present in the records.
    pub fn companies(&self) -> HashSet<&Cik> {
        self.records.iter().map(|r| &r.cik).collect()
    }
}

/// Sequential fetch-and-extract driver over a [`FactsSource`].
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    extractor: MetricExtractor,
    delay: Duration,
}

impl<S: FactsSource> Pipeline<S> {
    /// Create a pipeline from its parts.
    pub const fn new(source: S, extractor: MetricExtractor, delay: Duration) -> Self {
        Self {
            source,
            extractor,
            delay,
        }
    }

    /// Create a pipeline using the configured metrics, unit and delay.
    pub fn from_config(source: S, config: &PipelineConfig) -> Self {
        Self::new(source, config.extractor(), config.courtesy_delay())
    }

    /// The facts source this pipeline reads from.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Process every identifier.
    pub async fn run(&self, ciks: &[Cik]) -> PipelineOutput {
        self.run_with_progress(ciks, |_| {}).await
    }

    /// Process every identifier, reporting after each one.
    pub async fn run_with_progress<F>(&self, ciks: &[Cik], mut on_progress: F) -> PipelineOutput
    where
        F: FnMut(Progress<'_>),
    {
        let mut output = PipelineOutput::default();
        output.summary.identifiers = ciks.len();

        for (index, cik) in ciks.iter().enumerate() {
            // Applies before the first request too
            sleep(self.delay).await;

            let facts = self.source.company_facts(cik).await;
            let records = self.extractor.extract(cik, facts.as_ref());
            debug!(%cik, available = facts.is_some(), records = records.len(), "processed company");

            if facts.is_none() {
                output.summary.unavailable += 1;
            }
            if !records.is_empty() {
                output.summary.companies_with_records += 1;
            }

            on_progress(Progress {
                index,
                total: ciks.len(),
                cik,
                available: facts.is_some(),
                records: records.len(),
            });

            output.records.extend(records);
        }

        output.summary.records = output.records.len();
        info!(
            identifiers = output.summary.identifiers,
            unavailable = output.summary.unavailable,
            records = output.summary.records,
            "pipeline finished"
        );
        output
    }

    /// Load identifiers from `path` and process them.
    ///
    /// Input validation happens before any request is made.
    pub async fn run_file(&self, path: &Path) -> Result<PipelineOutput, InputError> {
        let ciks = load_ciks(path)?;
        Ok(self.run(&ciks).await)
    }
}
