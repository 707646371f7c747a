//! CSV Export
//!
//! Renders serializable records as comma-separated text. Columns come from
//! the first record's fields in declaration order.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use serde_json::{Map, Value};

/// Error when rendering records as CSV
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Record at row {0} is not a key/value object")]
    NotARecord(usize),
}

/// Render `rows` as CSV
///
/// ## Returns
/// * `Ok(None)` - `rows` is empty
/// * `Ok(Some(csv))` - Header line followed by one line per record, joined by `\n`
///
/// Fields missing from a later record render empty.
pub fn export_to_csv<T: Serialize>(rows: &[T]) -> Result<Option<String>, CsvError> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| match serde_json::to_value(row)? {
            Value::Object(map) => Ok(map),
            _ => Err(CsvError::NotARecord(index)),
        })
        .collect::<Result<Vec<Map<String, Value>>, CsvError>>()?;

    let Some(first) = records.first() else {
        return Ok(None);
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in &records {
        let line = headers
            .iter()
            .map(|h| render_value(record.get(h.as_str())))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(Some(lines.join("\n")))
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => escape_field(s),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => escape_field(&other.to_string()),
    }
}

/// Quote a field if it contains a separator, a quote or a line break
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Export filename `<prefix>_<yyyy-MM-dd_HH-mm>.csv` in local time
pub fn csv_filename<Tz: TimeZone>(prefix: &str, at: &DateTime<Tz>) -> String {
    let local = at.with_timezone(&Local);
    format!("{}_{}.csv", prefix, local.format("%Y-%m-%d_%H-%M"))
}
