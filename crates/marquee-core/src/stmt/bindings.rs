use super::Value;
use crate::{Error, Result};

use indexmap::IndexMap;

/// Placeholder name to value map for one compiled statement.
///
/// Keys carry their leading `:` (for example `:movie_id`), matching the
/// placeholder text in the SQL. Iteration follows insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bindings {
    entries: IndexMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Bindings {
        Bindings::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds `value` to `placeholder`. A previous value under the same name is
    /// replaced, which is how callers intentionally overwrite a binding.
    pub fn insert(&mut self, placeholder: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(placeholder.into(), value.into())
    }

    /// Binds a compiler-generated placeholder.
    ///
    /// Unlike [`insert`](Bindings::insert), an existing entry is never
    /// replaced: the collision is reported as an error.
    pub fn bind_generated(&mut self, placeholder: String, value: Value) -> Result<()> {
        use indexmap::map::Entry;

        match self.entries.entry(placeholder) {
            Entry::Occupied(entry) => Err(Error::binding_collision(entry.key().as_str())),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    pub fn get(&self, placeholder: &str) -> Option<&Value> {
        self.entries.get(placeholder)
    }

    pub fn contains(&self, placeholder: &str) -> bool {
        self.entries.contains_key(placeholder)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Appends all entries of `other`. Same-named entries take the value from
    /// `other`.
    pub fn extend_from(&mut self, other: &Bindings) {
        self.entries
            .extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Bindings {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
