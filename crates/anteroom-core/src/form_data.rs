#![forbid(unsafe_code)]

//! Ordered multimap for text form fields.
//!
//! ## Normative
//!
//! - Keys are unique and iterate in first-insertion order.
//! - Values per key are an ordered sequence.
//! - [`FormData::get`] returns the *last* value for a key (matching the
//!   lookup convention of multi-value form containers, where a repeated
//!   field's final occurrence wins).
//! - `set`/`set_all` replace a key's values wholesale; `append` extends them.

use serde::{Deserialize, Serialize};

/// Ordered multimap `field name → Vec<String>`.
///
/// Backed by a `Vec` of entries: form payloads are small and iteration order
/// matters more than lookup complexity here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    entries: Vec<(String, Vec<String>)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Last value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).and_then(|vs| vs.last()).map(String::as_str)
    }

    /// All values for `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.position(key)
            .map(|i| self.entries[i].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Replace `key`'s values with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set_all(key, vec![value.into()]);
    }

    /// Replace `key`'s values wholesale.
    pub fn set_all(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = values,
            None => self.entries.push((key, values)),
        }
    }

    /// Append one value to `key`, creating the key if absent.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1.push(value.into()),
            None => self.entries.push((key, vec![value.into()])),
        }
    }

    /// Remove `key`, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, vs)| (k.as_str(), vs.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `other` into `self`: every key in `other` replaces that key's
    /// values wholesale; keys only in `self` are untouched.
    pub fn overwrite_with(&mut self, other: &FormData) {
        for (k, vs) in other.iter() {
            self.set_all(k, vs.to_vec());
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (k, v) in iter {
            data.append(k, v);
        }
        data
    }
}
