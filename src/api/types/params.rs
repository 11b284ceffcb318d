//! Lenient numeric query-parameter parsing
//!
//! Values that fail to parse degrade to "not supplied" instead of
//! rejecting the request, matching the deployed behavior callers rely on:
//! `?ano=abc` serves the unfiltered result, `?page=abc` falls back to the
//! default page.

use serde::{Deserialize, Deserializer};

pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

pub fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
