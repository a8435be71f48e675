//! Cell value formatting per column format.
//!
//! Every path is total: values a numeric format cannot use fall back to their
//! plain string form and unparseable dates are returned unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::model::ColumnFormat;

pub fn format_value(value: Option<&Value>, format: ColumnFormat) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if value.is_null() {
        return String::new();
    }
    match format {
        ColumnFormat::Currency => value.as_f64().map(format_currency),
        ColumnFormat::Percentage => value.as_f64().map(format_percentage),
        ColumnFormat::Number => value.as_f64().map(format_number),
        ColumnFormat::Date => Some(format_date(value)),
        ColumnFormat::None | ColumnFormat::Plain => None,
    }
    .unwrap_or_else(|| plain(value))
}

/// Plain string form of a value: strings verbatim, whole numbers without a
/// fractional part, null as empty.
pub(crate) fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", f as i64)
                } else {
                    f.to_string()
                }
            }
        }
        other => other.to_string(),
    }
}

/// Round to `places` fraction digits, ties away from zero. `format!` alone
/// rounds exact binary ties to even.
fn round_half_away(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}

fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", round_half_away(amount.abs(), 2));
    format!("{sign}${}", group_decimal(&fixed))
}

fn format_percentage(ratio: f64) -> String {
    format!("{:.1}%", round_half_away(ratio * 100.0, 1))
}

/// Thousands-grouped, at most three fraction digits, trailing zeros dropped.
fn format_number(n: f64) -> String {
    let fixed = format!("{:.3}", round_half_away(n.abs(), 3));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let grouped = group_decimal(trimmed);
    if n < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Insert `,` separators into the integer part of an unsigned decimal string.
fn group_decimal(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn format_date(value: &Value) -> String {
    let parsed = match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    };
    match parsed {
        Some(date) => date.format("%m/%d/%Y").to_string(),
        None => plain(value),
    }
}

pub(crate) fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_datetime(s).map(|dt| dt.date())
}
