//! SEC EDGAR company facts documents.
//!
//! The SEC serves every XBRL fact a company has filed at:
//! `https://data.sec.gov/api/xbrl/companyfacts/CIK{cik_padded}.json`
//!
//! The payload is organized as taxonomy -> concept -> unit -> observations:
//!
//! ```json
//! {
//!   "cik": 320193,
//!   "entityName": "Apple Inc.",
//!   "facts": {
//!     "us-gaap": {
//!       "Assets": {
//!         "label": "Assets",
//!         "units": {
//!           "USD": [{ "end": "2023-09-30", "val": 352583000000, "form": "10-K" }]
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Documents run to thousands of concepts, most of which are never read. The
//! tree under `facts` is kept as raw JSON and observations are only decoded on
//! lookup, one at a time, so a malformed entry anywhere else in the document
//! cannot hide the values that are asked for.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Taxonomy namespace for US GAAP concepts.
pub const US_GAAP: &str = "us-gaap";

/// All facts reported by one company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFacts {
    /// CIK as returned by the SEC (unpadded integer)
    #[serde(default, deserialize_with = "lenient")]
    pub cik: Option<u64>,

    /// Company name
    #[serde(default, deserialize_with = "lenient")]
    pub entity_name: Option<String>,

    /// Raw concepts keyed by taxonomy
    #[serde(default, deserialize_with = "lenient")]
    pub facts: HashMap<String, Value>,
}

/// A single reported value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Reported value, kept in its JSON representation
    pub val: serde_json::Number,

    /// End of the reporting period (or the instant for balance sheet items)
    pub end: NaiveDate,

    /// Start of the reporting period, absent for instant facts
    #[serde(default)]
    pub start: Option<NaiveDate>,

    /// Accession number
    #[serde(default)]
    pub accn: Option<String>,

    /// Fiscal year
    #[serde(default)]
    pub fy: Option<i32>,

    /// Fiscal period (FY, Q1, ...)
    #[serde(default)]
    pub fp: Option<String>,

    /// Form type (10-K, 10-Q, ...)
    #[serde(default)]
    pub form: Option<String>,

    /// Filing date
    #[serde(default)]
    pub filed: Option<String>,

    /// Calendar frame (e.g. "CY2023Q4I")
    #[serde(default)]
    pub frame: Option<String>,
}

impl Observation {
    /// Returns true if this is an instant fact (point-in-time, like balance sheet items)
    pub const fn is_instant(&self) -> bool {
        self.start.is_none()
    }
}

impl CompanyFacts {
    /// Parses a company facts payload.
    ///
    /// Only the body has to be a JSON object; top-level fields of the wrong
    /// shape fall back to their defaults.
    pub fn parse_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DataError::Parse(format!("Failed to parse company facts: {}", e)))
    }

    /// Raw JSON of a concept in a taxonomy.
    pub fn concept(&self, taxonomy: &str, name: &str) -> Option<&Value> {
        self.facts.get(taxonomy)?.get(name)
    }

    /// Human readable label of a concept.
    pub fn label(&self, taxonomy: &str, name: &str) -> Option<&str> {
        self.concept(taxonomy, name)?.get("label")?.as_str()
    }

    /// Observations for a concept in a given unit, in document order.
    ///
    /// `None` if the concept or unit is absent. Entries that are not valid
    /// observations are dropped.
    pub fn observations(&self, taxonomy: &str, name: &str, unit: &str) -> Option<Vec<Observation>> {
        let entries = self
            .concept(taxonomy, name)?
            .get("units")?
            .get(unit)?
            .as_array()?;

        let observations = entries
            .iter()
            .filter_map(|entry| match Observation::deserialize(entry) {
                Ok(observation) => Some(observation),
                Err(e) => {
                    debug!(taxonomy, concept = name, unit, error = %e, "skipping observation");
                    None
                }
            })
            .collect();
        Some(observations)
    }
}

/// Deserialize a field, falling back to its default if the JSON has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
