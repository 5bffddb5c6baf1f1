use super::Value;

use indexmap::IndexMap;
use serde::Serialize;

/// An ordered mapping of column name to value.
///
/// Records are used for flat result rows, for the values of an insert or
/// update, and for the sub-records collected by the grouping engine. Column
/// order is insertion order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets a column, returning the previous value if the column was present.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(column.into(), value.into())
    }

    /// Builder-style [`insert`](Record::insert).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Record {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Removes a column, keeping the order of the remaining ones.
    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.fields.shift_remove(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.fields.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` when both records hold the same columns in the same order.
    pub fn same_columns(&self, other: &Record) -> bool {
        self.fields.len() == other.fields.len() && self.columns().eq(other.columns())
    }

    /// Copies the listed columns that are present, in the order given.
    pub fn pick<S: AsRef<str>>(&self, columns: &[S]) -> Record {
        columns
            .iter()
            .filter_map(|column| {
                let column = column.as_ref();
                self.fields
                    .get(column)
                    .map(|value| (column.to_string(), value.clone()))
            })
            .collect()
    }

    /// Removes the listed columns, returning the ones that were present.
    pub fn take<S: AsRef<str>>(&mut self, columns: &[S]) -> Record {
        columns
            .iter()
            .filter_map(|column| {
                let column = column.as_ref();
                self.remove(column).map(|value| (column.to_string(), value))
            })
            .collect()
    }

    /// Renames a column in place. Does nothing if `from` is absent.
    ///
    /// When `to` already names a column, that column keeps its position and
    /// takes the value of `from`.
    pub fn rename_key(&mut self, from: &str, to: impl Into<String>) {
        let to = to.into();
        if from == to {
            return;
        }

        let Some((index, _, value)) = self.fields.shift_remove_full(from) else {
            return;
        };

        match self.fields.get_mut(&to) {
            Some(slot) => *slot = value,
            None => {
                self.fields.shift_insert(index, to, value);
            }
        }
    }

    /// Strips `prefix` from every column name that starts with it.
    pub fn strip_prefix(mut self, prefix: &str) -> Record {
        let renames: Vec<_> = self
            .columns()
            .filter_map(|column| match column.strip_prefix(prefix) {
                Some(stripped) if !stripped.is_empty() => {
                    Some((column.to_string(), stripped.to_string()))
                }
                _ => None,
            })
            .collect();

        for (from, to) in renames {
            self.rename_key(&from, to);
        }

        self
    }

    /// Applies `f` to the value of `column`, if present.
    pub fn update(&mut self, column: &str, f: impl FnOnce(Value) -> crate::Result<Value>) -> crate::Result<()> {
        if let Some(slot) = self.fields.get_mut(column) {
            let value = std::mem::take(slot);
            *slot = f(value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Extend<(String, Value)> for Record {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.fields.extend(iter)
    }
}
