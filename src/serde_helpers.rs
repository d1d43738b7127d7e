//! Lenient decoding for loosely-typed feed attributes.
//!
//! Transit feeds are not strict about attribute types: a numeric field may
//! arrive as a string, an object may arrive as `null`. These helpers treat any
//! value that does not fit the target type as absent instead of rejecting the
//! whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decodes an optional field, mapping `null` or a value of the wrong JSON type
/// to `None`.
///
/// Pair with `#[serde(default)]` so a missing key also becomes `None`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but falls back to `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Decodes a list, dropping entries that do not fit `T`. `null` or a
/// non-array value decodes as an empty list.
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
