//! Serde helpers for Cloud Controller payloads

use serde::{Deserialize, Deserializer};

/// Decode `null` the same as a missing field
///
/// The API and the brokers behind it emit `null` for unset objects, lists and
/// strings. Use together with `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
