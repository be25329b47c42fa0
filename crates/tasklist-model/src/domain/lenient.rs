//! Tolerant decoders for fields that different backends spell differently.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
}

impl RawFlag {
    fn resolve<E: Error>(self) -> Result<bool, E> {
        match self {
            RawFlag::Bool(b) => Ok(b),
            RawFlag::Int(0) => Ok(false),
            RawFlag::Int(1) => Ok(true),
            RawFlag::Int(n) => Err(E::custom(format!(
                "invalid completion flag: {n} (expected bool, 0 or 1)"
            ))),
        }
    }
}

/// Completion flag: `true`/`false`, `1`/`0`, or `null` (treated as open).
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_flag(deserializer)?.unwrap_or(false))
}

/// Like [`flag`], but `null` stays `None`.
pub fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawFlag>::deserialize(deserializer)?
        .map(RawFlag::resolve)
        .transpose()
}
