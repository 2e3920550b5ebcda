//! Lenient numeric deserializers.
//!
//! The backend serializes SQL decimals inconsistently: sometimes as JSON
//! numbers, sometimes as strings, sometimes as `null`. These helpers accept
//! all three. A string that does not parse as a number coerces to `0.0`,
//! while `null` stays `None` so the sort engine can treat it as missing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Some(s.trim().parse::<f64>().unwrap_or(0.0)),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => Some(0.0),
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value).filter(|v| v.is_finite()))
}

pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_f64(deserializer)?.unwrap_or(0.0))
}

pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        other => coerce_f64(other).map(|f| f as i64),
    })
}

pub fn i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_i64(deserializer)?.unwrap_or(0))
}
