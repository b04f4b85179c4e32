//! Lenient field decoding for backend payloads.
//!
//! The ticketing backend is not strict about types: slots come back as numbers,
//! numeric strings, empty strings or `null`, and text fields may be `null` or
//! reference objects carrying a `display_value`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::slot::DeviceSlot;

/// Text field that tolerates `null`, numbers and reference objects.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_text).unwrap_or_default())
}

/// Ticket slot; `null`, `0`, `false` and blank text mean "not slotted".
pub(crate) fn slot<'de, D>(deserializer: D) -> Result<Option<DeviceSlot>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_slot))
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => map
            .get("display_value")
            .or_else(|| map.get("value"))
            .map(value_text)
            .unwrap_or_default(),
        Value::Array(_) => String::new(),
    }
}

pub(crate) fn value_slot(value: &Value) -> Option<DeviceSlot> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) => {
            let whole = n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            });
            match whole {
                Some(0) => None,
                Some(whole) => Some(
                    u32::try_from(whole)
                        .map_or_else(|_| DeviceSlot::Text(n.to_string()), DeviceSlot::Number),
                ),
                None => Some(DeviceSlot::Text(n.to_string())),
            }
        }
        other => {
            let text = value_text(other);
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(
                text.parse()
                    .map_or_else(|_| DeviceSlot::Text(text.to_owned()), DeviceSlot::Number),
            )
        }
    }
}
