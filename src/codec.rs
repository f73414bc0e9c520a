//! Import/export encodings for item collections.
//!
//! - JSON export is the canonical item shape wrapped as `{ "items": [...] }`,
//!   pretty-printed with two-space indentation.
//! - JSON import accepts that wrapper or a bare array. It checks structure
//!   only; field values are not validated.
//! - CSV export writes a fixed column set with every value quoted. CSV
//!   import reads it back into [`NewItem`] drafts (ids and creation times
//!   are not part of the CSV).

use std::fmt;

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config;
use crate::error::{Result, TrackerError};
use crate::models::{Item, NewItem};

// ---------------------------------------------------------------------------
// ExportFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Suggested download file name.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => config::JSON_EXPORT_FILE,
            Self::Csv => config::CSV_EXPORT_FILE,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

/// Encode `items` in the given format.
pub fn export(items: &[Item], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_json(items),
        ExportFormat::Csv => export_csv(items),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ExportEnvelope<'a> {
    items: &'a [Item],
}

pub fn export_json(items: &[Item]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportEnvelope { items })?)
}

/// Parse an exported file back into items.
///
/// Anything that is not a JSON array of items, or an object holding one
/// under `items`, fails with [`TrackerError::InvalidFile`]; a bad file never
/// turns into an empty or partial collection.
pub fn import_json(text: &str) -> Result<Vec<Item>> {
    let value: Value = serde_json::from_str(text).map_err(invalid_json)?;

    let items = match value {
        Value::Object(mut map) => map.remove("items").ok_or_else(|| {
            TrackerError::InvalidFile("Invalid JSON file: missing `items`".to_string())
        })?,
        other => other,
    };

    if !items.is_array() {
        return Err(TrackerError::InvalidFile(
            "Invalid JSON file: expected an array of items".to_string(),
        ));
    }

    serde_json::from_value(items).map_err(invalid_json)
}

fn invalid_json(e: serde_json::Error) -> TrackerError {
    TrackerError::InvalidFile(format!("Invalid JSON file: {e}"))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Write `items` as CSV: an unquoted header line, then one fully quoted
/// row per item in [`CSV_COLUMNS`](config::CSV_COLUMNS) order.
///
/// A zero or missing lifespan and a zero `daysPerWeek` are written as empty
/// fields, which read back as "absent". `price` is always written so every
/// exported row imports again.
pub fn export_csv(items: &[Item]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for item in items {
        writer.write_record([
            item.name.clone(),
            item.price.to_string(),
            item.purchase_date.to_string(),
            item.category.clone(),
            item.expected_years.map(number_field).unwrap_or_default(),
            number_field(item.days_per_week),
            item.notes.clone(),
        ])?;
    }

    let rows = writer
        .into_inner()
        .map_err(|e| TrackerError::Io(e.into_error()))?;
    let rows = String::from_utf8(rows)
        .map_err(|e| TrackerError::InvalidArgument(format!("CSV output is not UTF-8: {e}")))?;

    let mut out = config::CSV_COLUMNS.join(",");
    out.push('\n');
    out.push_str(&rows);
    Ok(out)
}

fn number_field(n: f64) -> String {
    if n == 0.0 || n.is_nan() {
        String::new()
    } else {
        n.to_string()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    name: String,
    price: f64,
    purchase_date: NaiveDate,
    #[serde(default)]
    category: String,
    #[serde(default)]
    expected_years: Option<f64>,
    #[serde(default)]
    days_per_week: Option<f64>,
    #[serde(default)]
    notes: String,
}

impl From<CsvRow> for NewItem {
    fn from(row: CsvRow) -> Self {
        NewItem {
            name: row.name,
            price: row.price,
            purchase_date: row.purchase_date,
            category: row.category,
            expected_years: row.expected_years,
            days_per_week: row.days_per_week.unwrap_or(config::DAYS_PER_WEEK),
            notes: row.notes,
        }
    }
}

/// Read a CSV export back into drafts.
///
/// Columns are matched by header name, so extra or reordered columns are
/// fine; `name`, `price` and `purchaseDate` are required on every row.
pub fn import_csv(text: &str) -> Result<Vec<NewItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .map(|row| {
            row.map(NewItem::from)
                .map_err(|e| TrackerError::InvalidFile(format!("Invalid CSV file: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<Item> {
        let created = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        vec![
            NewItem::new("Espresso \"Pro\" machine", 649.5, NaiveDate::from_ymd_opt(2023, 11, 20).unwrap())
                .category("Kitchen")
                .expected_years(8.0)
                .days_per_week(5.0)
                .notes("descale, monthly")
                .into_item("id-1".into(), created),
            NewItem::new("Socks", 12.0, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
                .into_item("id-2".into(), created),
        ]
    }

    #[test]
    fn json_export_wraps_items_and_keeps_null_lifespan() {
        let json = export_json(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"items\": ["));
        let value: Value = serde_json::from_str(&json).unwrap();
        let socks = &value["items"][1];
        assert!(socks["expectedYears"].is_null());
        assert!(socks.as_object().unwrap().contains_key("expectedYears"));
        assert_eq!(socks["price"], 12.0);
        assert_eq!(socks["purchaseDate"], "2024-01-05");
    }

    #[test]
    fn json_round_trip() {
        let items = sample();
        assert_eq!(import_json(&export_json(&items).unwrap()).unwrap(), items);
    }

    #[test]
    fn import_accepts_bare_array() {
        let items = sample();
        let bare = serde_json::to_string(&items).unwrap();
        assert_eq!(import_json(&bare).unwrap(), items);
    }

    #[test]
    fn import_rejects_malformed_input() {
        for bad in ["{not json", "{\"things\": []}", "42", "{\"items\": {}}", "[{\"name\": 1}]"] {
            let err = import_json(bad).unwrap_err();
            assert!(matches!(err, TrackerError::InvalidFile(_)), "{bad}: {err}");
            assert!(err.to_string().starts_with("Invalid JSON file"));
        }
    }

    #[test]
    fn import_does_not_validate_fields() {
        let json = r#"[{"id":"x","name":"","price":-5,"purchaseDate":"2024-01-01",
                       "daysPerWeek":40,"createdAt":"2024-01-01T00:00:00Z"}]"#;
        let items = import_json(json).unwrap();
        assert_eq!(items[0].price, -5.0);
        assert_eq!(items[0].days_per_week, 40.0);
    }

    #[test]
    fn csv_layout() {
        let csv = export_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "name,price,purchaseDate,category,expectedYears,daysPerWeek,notes");
        assert_eq!(
            lines[1],
            r#""Espresso ""Pro"" machine","649.5","2023-11-20","Kitchen","8","5","descale, monthly""#
        );
        assert_eq!(lines[2], r#""Socks","12","2024-01-05","","","7","""#);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_round_trip_keeps_core_fields() {
        let items = sample();
        let drafts = import_csv(&export_csv(&items).unwrap()).unwrap();
        assert_eq!(drafts.len(), items.len());
        for (draft, item) in drafts.iter().zip(&items) {
            assert_eq!(draft.name, item.name);
            assert_eq!(draft.price, item.price);
            assert_eq!(draft.purchase_date, item.purchase_date);
            assert_eq!(draft.category, item.category);
            assert_eq!(draft.expected_years, item.expected_years);
            assert_eq!(draft.days_per_week, item.days_per_week);
        }
    }

    #[test]
    fn zero_price_survives_csv_round_trip() {
        let created = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        let gift = NewItem::new("Gift", 0.0, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .days_per_week(0.0)
            .into_item("id-3".into(), created);

        let csv = export_csv(&[gift]).unwrap();
        assert_eq!(csv.lines().nth(1), Some(r#""Gift","0","2024-01-01","","","","""#));

        let drafts = import_csv(&csv).unwrap();
        assert_eq!(drafts[0].price, 0.0);
        assert_eq!(drafts[0].days_per_week, 7.0);
    }

    #[test]
    fn csv_import_reports_bad_rows() {
        let csv = "name,price,purchaseDate\n\"Lamp\",\"cheap\",\"2024-01-01\"\n";
        let err = import_csv(csv).unwrap_err();
        assert!(err.to_string().starts_with("Invalid CSV file"));
    }

    #[test]
    fn export_format_metadata() {
        assert_eq!(ExportFormat::Csv.file_name(), "value-tracker.csv");
        assert_eq!(ExportFormat::Json.content_type(), "application/json");
        assert_eq!(export(&[], ExportFormat::Csv).unwrap().lines().count(), 1);
    }
}
