//! Query-string construction for API requests.
//!
//! Responsibilities:
//! - Collect `(key, value)` pairs in insertion order.
//! - Skip absent optional values.
//! - Encode list filters as repeated `name[]` keys.
//!
//! Explicitly does NOT handle:
//! - Percent-encoding. `reqwest` encodes values when the pairs are attached.
//!
//! Invariants:
//! - An empty list contributes no pairs at all.
//! - Empty strings inside a list are dropped.

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pair.
    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a pair only when `value` is present.
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    /// Append a non-empty string, skipping blank values.
    pub fn push_non_empty(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.push(key, value);
        }
        self
    }

    /// Append `true` only when the flag is set; servers treat absence as false.
    pub fn push_flag(&mut self, key: &str, flag: bool) -> &mut Self {
        if flag {
            self.push(key, "true");
        }
        self
    }

    /// Append each value under `base[]`.
    pub fn push_array(&mut self, base: &str, values: &[String]) -> &mut Self {
        let key = format!("{base}[]");
        for value in values.iter().filter(|v| !v.is_empty()) {
            self.0.push((key.clone(), value.clone()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Values recorded for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}
