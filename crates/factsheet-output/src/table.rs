//! Plain-text table rendering for terminal output.

use factsheet_data::edgar::MetricRecord;

/// Render records as an aligned text table.
///
/// Columns match the CSV export. Returns an empty string when there is
/// nothing to show.
pub fn to_ascii_table(records: &[MetricRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let metric_width = records
        .iter()
        .map(|r| r.metric.len())
        .max()
        .unwrap_or(0)
        .max("Metric".len());
    let value_width = records
        .iter()
        .map(|r| r.value.to_string().len())
        .max()
        .unwrap_or(0)
        .max("Value".len());
    let total_width = 10 + 1 + metric_width + 1 + value_width + 1 + 10 + 1 + 10;

    let mut output = String::new();

    output.push_str(&format!(
        "{:<10} {:<mw$} {:>vw$} {:<10} {:<10}\n",
        "CIK",
        "Metric",
        "Value",
        "Start",
        "End",
        mw = metric_width,
        vw = value_width
    ));
    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    for record in records {
        let start = record.start.map(|d| d.to_string()).unwrap_or_default();
        output.push_str(&format!(
            "{:<10} {:<mw$} {:>vw$} {:<10} {:<10}\n",
            record.cik.as_str(),
            record.metric,
            record.value.to_string(),
            start,
            record.end.to_string(),
            mw = metric_width,
            vw = value_width
        ));
    }

    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use factsheet_data::Cik;

    #[test]
    fn test_table_rows_and_alignment() {
        let records = vec![
            MetricRecord {
                cik: Cik::parse("320193").unwrap(),
                metric: "Assets".to_string(),
                value: 352583000000u64.into(),
                start: None,
                end: NaiveDate::from_ymd_opt(2023, 9, 30).unwrap(),
            },
            MetricRecord {
                cik: Cik::parse("789019").unwrap(),
                metric: "NetCashProvidedByUsedInOperatingActivities".to_string(),
                value: 87582000000u64.into(),
                start: NaiveDate::from_ymd_opt(2022, 7, 1),
                end: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
            },
        ];

        let table = to_ascii_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        // header, rule, two rows, rule
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("CIK"));
        assert!(lines[2].starts_with("0000320193 Assets"));
        assert!(lines[3].contains("2022-07-01 2023-06-30"));
        assert_eq!(lines[2].len(), lines[3].len());
    }

    #[test]
    fn test_empty_table() {
        assert!(to_ascii_table(&[]).is_empty());
    }
}
