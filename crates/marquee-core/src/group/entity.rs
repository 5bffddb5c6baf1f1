use crate::stmt::{Record, Value};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A primary record together with its related sub-record lists.
///
/// Serializes as a single JSON object: the primary columns first, then one
/// array per relation, in declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Entity {
    fields: Record,
    relations: IndexMap<String, Vec<Record>>,
}

impl Entity {
    pub fn new(fields: Record) -> Entity {
        Entity {
            fields,
            relations: IndexMap::new(),
        }
    }

    pub fn fields(&self) -> &Record {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Record {
        &mut self.fields
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Sub-records collected for `name`, or `None` if no such relation was
    /// declared.
    pub fn relation(&self, name: &str) -> Option<&[Record]> {
        self.relations.get(name).map(Vec::as_slice)
    }

    pub fn relation_mut(&mut self, name: &str) -> Option<&mut Vec<Record>> {
        self.relations.get_mut(name)
    }

    pub fn relation_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.relations.keys().map(String::as_str)
    }

    /// Registers an (initially empty) relation list.
    pub fn declare(&mut self, name: &str) {
        self.relations.entry(name.to_string()).or_default();
    }

    pub fn push(&mut self, name: &str, tuple: Record) {
        self.relations.entry(name.to_string()).or_default().push(tuple);
    }

    /// Applies `f` to every sub-record of relation `name`.
    pub fn update_relation(
        &mut self,
        name: &str,
        mut f: impl FnMut(&mut Record) -> crate::Result<()>,
    ) -> crate::Result<()> {
        if let Some(tuples) = self.relations.get_mut(name) {
            for tuple in tuples {
                f(tuple)?;
            }
        }
        Ok(())
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + self.relations.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        for (name, tuples) in &self.relations {
            map.serialize_entry(name, tuples)?;
        }
        map.end()
    }
}
