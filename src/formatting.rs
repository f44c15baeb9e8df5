//! Display helpers shared by templates and CSV exports.

use std::collections::HashMap;

use tera::{Tera, Value, to_value, try_get_value};

use crate::domain::codigo_descuento::UsageLevel;
use crate::domain::types::group_thousands;

/// Formats a raw RUT as `12.345.678-5`.
///
/// Values that already contain a hyphen are returned unchanged.
pub fn format_rut(raw: &str) -> String {
    if raw.contains('-') {
        return raw.to_string();
    }
    let mut chars = raw.chars();
    let Some(check) = chars.next_back() else {
        return String::new();
    };
    format!("{}-{check}", group_thousands(chars.as_str()))
}

/// Date part of an ISO-8601 timestamp, or `-` when there is none.
pub fn format_date_only(iso: &str) -> String {
    if iso.is_empty() {
        return "-".to_string();
    }
    iso.split('T').next().unwrap_or(iso).to_string()
}

/// Formats an amount of Chilean pesos as `$1.234.567`.
pub fn format_clp(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&amount.unsigned_abs().to_string()))
}

fn rut_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = try_get_value!("rut", "value", String, value);
    Ok(to_value(format_rut(&raw))?)
}

fn date_only_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let formatted = match value {
        Value::Null => "-".to_string(),
        Value::String(iso) => format_date_only(iso),
        other => format_date_only(&other.to_string()),
    };
    Ok(to_value(formatted)?)
}

fn usage_level_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let percentage = try_get_value!("usage_level", "value", i64, value);
    Ok(to_value(UsageLevel::from_percentage(percentage).css_class())?)
}

fn clp_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let amount = try_get_value!("clp", "value", i64, value);
    Ok(to_value(format_clp(amount))?)
}

/// Registers the dashboard's custom filters on `tera`.
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("rut", rut_filter);
    tera.register_filter("date_only", date_only_filter);
    tera.register_filter("usage_level", usage_level_filter);
    tera.register_filter("clp", clp_filter);
}
