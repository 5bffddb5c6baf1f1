//! Reconstruction of nested entities from flat, joined rows.
//!
//! A query such as "movies with their roles, genres and countries" is run as
//! one SELECT with LEFT JOINs, which yields one row per combination of
//! related records. [`Grouping`] folds those rows back together: one
//! [`Entity`] per distinct grouping key, with each [`Relation`]'s columns
//! collected into an ordered list of sub-records.

mod entity;
pub use entity::Entity;

mod key;
use key::GroupKey;

mod relation;
pub use relation::Relation;

use crate::stmt::Record;

use indexmap::IndexMap;

/// Describes how to fold flat rows into [`Entity`] values.
#[derive(Debug, Clone)]
pub struct Grouping {
    /// Column whose value identifies an entity
    key: String,

    /// Column groups collected into sub-record lists
    relations: Vec<Relation>,
}

impl Grouping {
    pub fn new(key: impl Into<String>) -> Grouping {
        Grouping {
            key: key.into(),
            relations: vec![],
        }
    }

    pub fn relation(mut self, relation: Relation) -> Grouping {
        self.relations.push(relation);
        self
    }

    pub fn relations(mut self, relations: impl IntoIterator<Item = Relation>) -> Grouping {
        self.relations.extend(relations);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Folds `rows` into entities, in first-seen key order.
    ///
    /// Sub-record lists are compacted: tuples whose identifying column is null
    /// or absent (left join misses) are dropped, then duplicates are removed,
    /// keeping the first occurrence.
    pub fn group(&self, rows: impl IntoIterator<Item = Record>) -> Vec<Entity> {
        let mut entities = self.collect(rows);

        for entity in &mut entities {
            for relation in &self.relations {
                relation.compact(entity);
            }
        }

        entities
    }

    /// Folds `rows` into entities without compacting the sub-record lists.
    ///
    /// Every row contributes one tuple per relation whose columns it carries,
    /// placeholders and duplicates included.
    pub fn collect(&self, rows: impl IntoIterator<Item = Record>) -> Vec<Entity> {
        let mut entities: IndexMap<GroupKey, Entity> = IndexMap::new();
        let mut row_count = 0usize;

        for mut row in rows {
            row_count += 1;
            let key = GroupKey::from(row.get(&self.key));

            match entities.get_mut(&key) {
                Some(entity) => {
                    // Primary columns repeat on every joined row; only the
                    // relation columns carry new information.
                    for relation in &self.relations {
                        if let Some(tuple) = relation.extract(&mut row) {
                            entity.push(relation.name(), tuple);
                        }
                    }
                }
                None => {
                    let mut entity = Entity::new(Record::new());

                    for relation in &self.relations {
                        entity.declare(relation.name());
                        if let Some(tuple) = relation.extract(&mut row) {
                            entity.push(relation.name(), tuple);
                        }
                    }

                    *entity.fields_mut() = row;
                    entities.insert(key, entity);
                }
            }
        }

        tracing::trace!(
            key = %self.key,
            rows = row_count,
            entities = entities.len(),
            "grouped rows"
        );

        entities.into_values().collect()
    }
}

/// Groups `rows` by `key`, collecting each relation's columns into ordered,
/// compacted sub-record lists.
///
/// Shorthand for [`Grouping::new`] followed by [`Grouping::group`].
pub fn group(
    rows: impl IntoIterator<Item = Record>,
    key: &str,
    relations: impl IntoIterator<Item = Relation>,
) -> Vec<Entity> {
    Grouping::new(key).relations(relations).group(rows)
}
