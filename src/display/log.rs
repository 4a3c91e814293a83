//! Log record display formatting
//!
//! Formats change history for terminal output in table and detail views.

use serde_json::Value;

use crate::models::LogRecord;
use crate::services::OwnerSummary;

const MAX_STRING_CHARS: usize = 50;

/// Format a list of log records as a table
pub fn format_log_list(records: &[LogRecord]) -> String {
    if records.is_empty() {
        return "No log records found.".to_string();
    }

    let id_width = records
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let actor_width = records
        .iter()
        .map(|r| actor_label(r).len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>id_width$}  {:<20}  {:<actor_width$}  {}\n",
        "ID",
        "Created",
        "Actor",
        "Changed Fields",
        id_width = id_width,
        actor_width = actor_width,
    ));

    output.push_str(&format!(
        "{:->id_width$}  {:-<20}  {:-<actor_width$}  {:-<14}\n",
        "",
        "",
        "",
        "",
        id_width = id_width,
        actor_width = actor_width,
    ));

    for record in records {
        let fields = if record.payload.is_empty() {
            "(none)".to_string()
        } else {
            record
                .payload
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        output.push_str(&format!(
            "{:>id_width$}  {:<20}  {:<actor_width$}  {}\n",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            actor_label(record),
            fields,
            id_width = id_width,
            actor_width = actor_width,
        ));
    }

    output
}

/// Format a single log record with its payload
pub fn format_log_details(record: &LogRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Log Record: {}\n", record.id));
    output.push_str(&format!("  Owner:   {}\n", record.owner));
    output.push_str(&format!("  Table:   {}\n", record.table_name));
    output.push_str(&format!("  Actor:   {}\n", actor_label(record)));
    output.push_str(&format!(
        "  Created: {}\n",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(reason) = &record.reason {
        output.push_str(&format!("  Reason:  {}\n", reason));
    }

    output.push('\n');
    if record.payload.is_empty() {
        output.push_str("  No field values recorded.\n");
    } else {
        output.push_str("  Changes:\n");
        for (field, value) in record.payload.iter() {
            output.push_str(&format!("    {}: {}\n", field, format_value(value)));
        }
    }

    output
}

/// Format owners with their record counts
pub fn format_owner_list(owners: &[OwnerSummary]) -> String {
    if owners.is_empty() {
        return "No audited entities found.".to_string();
    }

    let owner_width = owners
        .iter()
        .map(|o| o.owner.to_string().len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<owner_width$}  {:>7}\n",
        "Owner",
        "Records",
        owner_width = owner_width,
    ));
    output.push_str(&format!(
        "{:-<owner_width$}  {:->7}\n",
        "",
        "",
        owner_width = owner_width,
    ));

    for summary in owners {
        output.push_str(&format!(
            "{:<owner_width$}  {:>7}\n",
            summary.owner.to_string(),
            summary.record_count,
            owner_width = owner_width,
        ));
    }

    output
}

fn actor_label(record: &LogRecord) -> String {
    record
        .actor_id
        .as_ref()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Compact single-line rendering of a JSON value
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > MAX_STRING_CHARS {
                let truncated: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
