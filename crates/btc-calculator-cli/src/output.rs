//! Output formatters. Every command produces a `serde_json::Value`; the
//! global `--output` flag picks how it is printed.

use serde_json::Value;
use std::io;
use tabled::{builder::Builder, Table};

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => print_table(value),
        OutputFormat::Csv => print_csv(value),
        OutputFormat::Minimal => print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Headline result fields, in priority order, for `--output minimal`.
/// Validation (`--check`) results resolve to the `valid` boolean.
const MINIMAL_KEYS: [&str; 6] = [
    "cagr",
    "future_value_after_tax",
    "future_value",
    "tax_payable",
    "after_tax_proceeds",
    "valid",
];

/// Print just the key answer value from the output.
fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    if let Value::Object(map) = value {
        for key in &MINIMAL_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return scalar(val);
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, scalar(val));
        }
    }
    scalar(value)
}

/// Two-column field/value table, with series fields (price_data, scenarios)
/// rendered as their own record tables underneath.
fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                if !is_record_series(val) {
                    builder.push_record([key.as_str(), &scalar(val)]);
                }
            }
            println!("{}", Table::from(builder));

            for (key, val) in map {
                if let Value::Array(records) = val {
                    if is_record_series(val) {
                        println!("\n{}:", key);
                        print_records(records);
                    }
                }
            }
        }
        Value::Array(records) => print_records(records),
        _ => println!("{}", value),
    }
}

fn print_records(records: &[Value]) {
    let Some(Value::Object(first)) = records.first() else {
        for item in records {
            println!("{}", scalar(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in records {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

/// Write output as CSV to stdout. Objects become field,value rows; record
/// arrays become header + rows.
fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &scalar(val)]);
            }
        }
        Value::Array(records) => {
            if let Some(Value::Object(first)) = records.first() {
                let headers: Vec<String> = first.keys().cloned().collect();
                let _ = wtr.write_record(&headers);
                for item in records {
                    if let Value::Object(map) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| map.get(h.as_str()).map(scalar).unwrap_or_default())
                            .collect();
                        let _ = wtr.write_record(row);
                    }
                }
            } else {
                for item in records {
                    let _ = wtr.write_record([scalar(item)]);
                }
            }
        }
        _ => {
            let _ = wtr.write_record([scalar(value)]);
        }
    }
    let _ = wtr.flush();
}

fn is_record_series(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if matches!(arr.first(), Some(Value::Object(_))))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_prefers_headline_field() {
        let value = json!({
            "initial_value": 27000,
            "cagr": "74.07",
            "years": "5.0021"
        });
        assert_eq!(minimal_line(&value), "74.07");
    }

    #[test]
    fn test_minimal_check_result_prints_valid_flag() {
        let value = json!({"valid": true, "errors": []});
        assert_eq!(minimal_line(&value), "true");

        let value = json!({"valid": false, "errors": ["Cost base must be greater than 0"]});
        assert_eq!(minimal_line(&value), "false");
    }

    #[test]
    fn test_minimal_falls_back_to_first_field() {
        let value = json!({"holding_period_months": 16});
        assert_eq!(minimal_line(&value), "holding_period_months: 16");
    }
}
