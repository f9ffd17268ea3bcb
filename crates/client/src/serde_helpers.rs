//! Serde helpers for the API's loosely typed JSON.
//!
//! Responsibilities:
//! - `OneOrMany<T>` for fields that arrive either as a scalar or as a list.
//! - Lenient numeric parsing for fields that are sometimes sent as strings.
//!
//! Explicitly does NOT handle:
//! - Envelope detection (see `models::envelope`).

use serde::{Deserialize, Serialize};

/// A value the API sends either as a single item or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// View as a slice regardless of shape.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(v) => v,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    F64(f64),
    String(String),
}

/// Deserialize an optional `u64` sent as a number, a float or a numeric string.
///
/// Unparseable strings become `None` rather than failing the whole response.
pub fn opt_u64_lenient<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<U64OrString>::deserialize(deserializer)?;
    Ok(match value {
        None => None,
        Some(U64OrString::U64(v)) => Some(v),
        Some(U64OrString::F64(v)) if v.is_finite() && v >= 0.0 => Some(v as u64),
        Some(U64OrString::F64(_)) => None,
        Some(U64OrString::String(s)) => s.trim().parse().ok(),
    })
}
