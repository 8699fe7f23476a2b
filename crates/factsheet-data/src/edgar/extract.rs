//! Latest-value extraction for a fixed list of US GAAP metrics.

use super::facts::{CompanyFacts, Observation, US_GAAP};
use crate::cik::Cik;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Metrics extracted by default, in output order.
///
/// Spans the income statement, balance sheet and cash flow statement.
pub const DEFAULT_METRICS: [&str; 14] = [
    "Revenues",
    "RevenueFromContractWithCustomerExcludingAssessedTax",
    "NetIncomeLoss",
    "OperatingIncomeLoss",
    "GrossProfit",
    "EarningsPerShareBasic",
    "EarningsPerShareDiluted",
    "Assets",
    "Liabilities",
    "StockholdersEquity",
    "CashAndCashEquivalentsAtCarryingValue",
    "NetCashProvidedByUsedInOperatingActivities",
    "NetCashProvidedByUsedInInvestingActivities",
    "NetCashProvidedByUsedInFinancingActivities",
];

/// Default reporting unit. Metrics filed only in other units are ignored.
pub const DEFAULT_REPORTING_UNIT: &str = "USD";

/// The latest value of one metric for one company.
///
/// Field names serialize as the export column headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    /// Company identifier
    #[serde(rename = "CIK")]
    pub cik: Cik,

    /// US GAAP concept name
    #[serde(rename = "Metric")]
    pub metric: String,

    /// Reported value
    #[serde(rename = "Value")]
    pub value: serde_json::Number,

    /// Period start, empty for instant facts
    #[serde(rename = "Start")]
    pub start: Option<NaiveDate>,

    /// Period end
    #[serde(rename = "End")]
    pub end: NaiveDate,
}

/// Picks the most recent observation of each whitelisted metric.
#[derive(Debug, Clone)]
pub struct MetricExtractor {
    metrics: Vec<String>,
    unit: String,
}

impl MetricExtractor {
    /// Create an extractor for the given metrics and reporting unit.
    pub fn new(metrics: Vec<String>, unit: impl Into<String>) -> Self {
        Self {
            metrics,
            unit: unit.into(),
        }
    }

    /// Metrics this extractor looks for, in output order.
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Reporting unit this extractor reads.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Extract one record per whitelisted metric present in `facts`.
    ///
    /// Metrics missing from the document, or missing in the reporting unit,
    /// are skipped silently. `None` yields no records.
    pub fn extract(&self, cik: &Cik, facts: Option<&CompanyFacts>) -> Vec<MetricRecord> {
        let Some(facts) = facts else {
            return Vec::new();
        };

        self.metrics
            .iter()
            .filter_map(|metric| {
                let observations = facts
                    .observations(US_GAAP, metric, &self.unit)
                    .unwrap_or_default();
                let Some(latest) = latest_observation(&observations) else {
                    debug!(%cik, %metric, unit = %self.unit, "metric absent");
                    return None;
                };

                Some(MetricRecord {
                    cik: cik.clone(),
                    metric: metric.clone(),
                    value: latest.val.clone(),
                    start: latest.start,
                    end: latest.end,
                })
            })
            .collect()
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self::new(
            DEFAULT_METRICS.iter().map(|m| (*m).to_string()).collect(),
            DEFAULT_REPORTING_UNIT,
        )
    }
}

/// The observation with the latest period end.
///
/// Among observations sharing the latest end date, the first in document
/// order wins.
pub fn latest_observation(observations: &[Observation]) -> Option<&Observation> {
    // max_by_key keeps the last maximum, so walk backwards
    observations.iter().rev().max_by_key(|o| o.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn observation(val: i64, start: Option<&str>, end: &str) -> Observation {
        Observation {
            val: val.into(),
            end: date(end),
            start: start.map(date),
            accn: None,
            fy: None,
            fp: None,
            form: None,
            filed: None,
            frame: None,
        }
    }

    fn facts_in(taxonomy: &str, entries: Vec<(&str, &str, Vec<Observation>)>) -> CompanyFacts {
        let mut doc = serde_json::json!({});
        for (metric, unit, observations) in entries {
            doc["facts"][taxonomy][metric]["units"][unit] =
                serde_json::to_value(observations).unwrap();
        }
        serde_json::from_value(doc).unwrap()
    }

    fn facts_with(entries: Vec<(&str, &str, Vec<Observation>)>) -> CompanyFacts {
        facts_in(US_GAAP, entries)
    }

    fn cik() -> Cik {
        Cik::parse("320193").unwrap()
    }

    #[test]
    fn test_selects_latest_end_date() {
        let facts = facts_with(vec![(
            "Assets",
            "USD",
            vec![
                observation(950, None, "2022-12-31"),
                observation(1000, None, "2023-12-31"),
            ],
        )]);

        let records = MetricExtractor::default().extract(&cik(), Some(&facts));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric, "Assets");
        assert_eq!(records[0].end, date("2023-12-31"));
        assert_eq!(records[0].value, serde_json::Number::from(1000));
        assert_eq!(records[0].start, None);
    }

    #[test]
    fn test_keeps_period_start() {
        let facts = facts_with(vec![(
            "NetIncomeLoss",
            "USD",
            vec![
                observation(10, Some("2023-01-01"), "2023-12-31"),
                observation(8, Some("2022-01-01"), "2022-12-31"),
            ],
        )]);

        let records = MetricExtractor::default().extract(&cik(), Some(&facts));
        assert_eq!(records[0].start, Some(date("2023-01-01")));
    }

    #[test]
    fn test_missing_metric_is_omitted() {
        let facts = facts_with(vec![
            ("Assets", "USD", vec![observation(1, None, "2023-12-31")]),
            ("Revenues", "USD", vec![observation(2, None, "2023-12-31")]),
        ]);

        let records = MetricExtractor::default().extract(&cik(), Some(&facts));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.metric != "NetIncomeLoss"));
    }

    #[test]
    fn test_other_units_are_ignored() {
        let facts = facts_with(vec![
            ("Assets", "EUR", vec![observation(1, None, "2023-12-31")]),
            ("Revenues", "USD", vec![]),
        ]);

        let records = MetricExtractor::default().extract(&cik(), Some(&facts));
        assert!(records.is_empty());
    }

    #[test]
    fn test_non_gaap_taxonomy_is_ignored() {
        let facts = facts_in(
            "ifrs-full",
            vec![("Assets", "USD", vec![observation(1, None, "2023-12-31")])],
        );

        assert!(MetricExtractor::default().extract(&cik(), Some(&facts)).is_empty());
    }

    #[test]
    fn test_records_follow_whitelist_order() {
        let facts = facts_with(vec![
            ("NetCashProvidedByUsedInFinancingActivities", "USD", vec![observation(3, None, "2023-12-31")]),
            ("Revenues", "USD", vec![observation(1, None, "2023-12-31")]),
            ("Assets", "USD", vec![observation(2, None, "2023-12-31")]),
        ]);

        let metrics: Vec<String> = MetricExtractor::default()
            .extract(&cik(), Some(&facts))
            .into_iter()
            .map(|r| r.metric)
            .collect();
        assert_eq!(
            metrics,
            vec!["Revenues", "Assets", "NetCashProvidedByUsedInFinancingActivities"]
        );
    }

    #[test]
    fn test_at_most_one_record_per_metric() {
        let entries = DEFAULT_METRICS
            .iter()
            .map(|m| {
                (
                    *m,
                    "USD",
                    vec![
                        observation(1, None, "2021-12-31"),
                        observation(2, None, "2022-12-31"),
                    ],
                )
            })
            .collect();
        let facts = facts_with(entries);

        let records = MetricExtractor::default().extract(&cik(), Some(&facts));
        assert_eq!(records.len(), DEFAULT_METRICS.len());
    }

    #[test]
    fn test_malformed_entries_elsewhere_do_not_drop_metrics() {
        let facts = CompanyFacts::parse_json(
            r#"{"facts": {
                "dei": {"EntityPublicFloat": {"units": {"USD": [{"end": "2023-03-31", "val": null}]}}},
                "us-gaap": {"Assets": {"units": {"USD": [
                    {"end": "2023-09-30", "val": 352583000000},
                    {"end": "2024-09-28", "val": "n/a"}
                ]}}}
            }}"#,
        )
        .unwrap();

        let records = MetricExtractor::default().extract(&cik(), Some(&facts));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric, "Assets");
        assert_eq!(records[0].end, date("2023-09-30"));
        assert_eq!(records[0].value, serde_json::Number::from(352583000000u64));
    }

    #[test]
    fn test_no_data_yields_nothing() {
        assert!(MetricExtractor::default().extract(&cik(), None).is_empty());
    }

    #[test]
    fn test_custom_unit_and_metrics() {
        let facts = facts_with(vec![(
            "EarningsPerShareBasic",
            "USD/shares",
            vec![observation(6, Some("2022-10-01"), "2023-09-30")],
        )]);

        let extractor =
            MetricExtractor::new(vec!["EarningsPerShareBasic".to_string()], "USD/shares");
        let records = extractor.extract(&cik(), Some(&facts));
        assert_eq!(records.len(), 1);
        assert_eq!(extractor.unit(), "USD/shares");
    }

    #[test]
    fn test_latest_observation_tie_takes_first() {
        let observations = vec![
            observation(1, None, "2023-12-31"),
            observation(2, None, "2023-12-31"),
            observation(3, None, "2022-12-31"),
        ];

        let latest = latest_observation(&observations).unwrap();
        assert_eq!(latest.end, date("2023-12-31"));
        assert_eq!(latest.val, serde_json::Number::from(1));
    }

    #[test]
    fn test_latest_observation_empty() {
        assert!(latest_observation(&[]).is_none());
    }
}
