//! Serialized form contents, as read at submission time

use super::field::FormField;
use serde::Serialize;

/// Ordered `(identifier, value)` pairs of a form
///
/// This is both what the validator chain inspects and the url-encoded body
/// that is POSTed to the backstage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    pairs: Vec<(String, String)>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FormField>) -> Self {
        let mut snapshot = Self::new();
        for field in fields {
            snapshot.push(&field.name, field.as_text());
        }
        snapshot
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Replace a field's value, appending it when absent
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        match self.pairs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.into(),
            None => self.push(name, value),
        }
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Value of a field; absent fields read as empty
    pub fn get(&self, name: &str) -> &str {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Values of list entries for `role`, as `(order, value)` sorted by order
    ///
    /// Entry identifiers are `{role}-{order}`.
    pub fn entries(&self, role: &str) -> Vec<(u32, &str)> {
        let mut entries: Vec<(u32, &str)> = self
            .pairs
            .iter()
            .filter_map(|(name, value)| {
                let order = name.strip_prefix(role)?.strip_prefix('-')?.parse().ok()?;
                Some((order, value.as_str()))
            })
            .collect();
        entries.sort_by_key(|(order, _)| *order);
        entries
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
