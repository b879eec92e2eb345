#![forbid(unsafe_code)]

//! Ordered multimap for file-valued form fields, generic over the value type.
//!
//! The same container shape is used at every layer of the cache:
//! `FileMap<UploadedFile>` for raw request uploads, `FileMap<FileRef>` for
//! persisted storage references, `FileMap<CachedFile>` for loaded handles.
//! [`FileMap::map`] / [`FileMap::try_map`] move a map between layers while
//! preserving key and value order.

use serde::{Deserialize, Serialize};

/// Ordered multimap `field name → Vec<T>`. Same multimap laws as
/// [`FormData`](crate::FormData).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMap<T> {
    entries: Vec<(String, Vec<T>)>,
}

impl<T> Default for FileMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> FileMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get_all(&self, key: &str) -> Option<&[T]> {
        self.position(key).map(|i| self.entries[i].1.as_slice())
    }

    /// Last value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.get_all(key).and_then(|vs| vs.last())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Replace `key`'s values wholesale.
    pub fn set_all(&mut self, key: impl Into<String>, values: Vec<T>) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = values,
            None => self.entries.push((key, values)),
        }
    }

    /// Append one value to `key`, creating the key if absent.
    pub fn append(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Remove `key`, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<T>> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.entries.iter().map(|(k, vs)| (k.as_str(), vs.as_slice()))
    }

    /// All values across all keys, in map order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().flat_map(|(_, vs)| vs.iter())
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
    pub fn overwrite_with(&mut self, other: FileMap<T>) {
        for (k, vs) in other.entries {
            self.set_all(k, vs);
        }
    }

    /// Map every value, preserving key and value order.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> FileMap<U> {
        FileMap {
            entries: self
                .entries
                .iter()
                .map(|(k, vs)| (k.clone(), vs.iter().map(&mut f).collect()))
                .collect(),
        }
    }

    /// Map every value through a fallible function, failing the whole map on
    /// the first error.
    pub fn try_map<U, E>(&self, mut f: impl FnMut(&T) -> Result<U, E>) -> Result<FileMap<U>, E> {
        let mut out = FileMap::new();
        for (k, vs) in &self.entries {
            let mapped = vs.iter().map(&mut f).collect::<Result<Vec<_>, E>>()?;
            out.set_all(k.clone(), mapped);
        }
        Ok(out)
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for FileMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = FileMap::new();
        for (k, v) in iter {
            map.append(k, v);
        }
        map
    }
}
