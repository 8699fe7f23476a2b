#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod input;
pub mod pipeline;

// Re-export main types from sub-crates
pub use factsheet_data as data;
pub use factsheet_output as output;

pub use config::{ConfigError, DEFAULT_COURTESY_DELAY_MS, PipelineConfig, default_config_path};
pub use data::Cik;
pub use data::edgar::{EdgarClient, FactsSource, MetricExtractor, MetricRecord};
pub use input::{CIK_COLUMN, InputError, load_ciks};
pub use pipeline::{Pipeline, PipelineOutput, Progress, RunSummary};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
