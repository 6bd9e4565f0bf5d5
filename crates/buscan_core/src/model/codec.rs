//! Serde helpers shared by the persisted record types.

use serde::{Deserialize, Deserializer};

/// Reads an optional route reference, mapping blank strings to `None`.
///
/// Older data files store "no route" as `""` instead of `null`.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|route| !route.trim().is_empty()))
}
