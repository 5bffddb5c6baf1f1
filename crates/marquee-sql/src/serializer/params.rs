use super::{Formatter, ToSql};

use marquee_core::{stmt::Value, Result};

/// A generated named placeholder, including its leading `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Placeholder(String);

impl Placeholder {
    /// Placeholder named after `column`, optionally suffixed with `_<n>`.
    ///
    /// Characters that cannot appear in a placeholder name are replaced by
    /// `_`, so `movie.title` becomes `:movie_title`.
    pub(super) fn for_column(column: &str, suffix: Option<usize>) -> Placeholder {
        let mut name = String::with_capacity(column.len() + 4);
        name.push(':');
        name.extend(column.chars().map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        }));

        if let Some(n) = suffix {
            name.push('_');
            name.push_str(&n.to_string());
        }

        Placeholder(name)
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    /// Records `value` under this placeholder and returns the name actually
    /// bound.
    ///
    /// Distinct columns can sanitize to the same name (`movie.title` and
    /// `movie_title`). A name already generated for the current statement
    /// gets the first free `_<n>` suffix, starting at 2. A clash with a
    /// caller binding is still a binding collision.
    pub(super) fn bind(self, f: &mut Formatter<'_>, value: &Value) -> Result<Placeholder> {
        let mut name = self.0;

        if f.generated.contains(&name) {
            let base = name;
            let mut n = 2;
            name = loop {
                let candidate = format!("{base}_{n}");
                if !f.generated.contains(&candidate) && !f.bindings.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
        }

        f.bindings.bind_generated(name.clone(), value.clone())?;
        f.generated.insert(name.clone());
        Ok(Placeholder(name))
    }
}

impl ToSql for &Placeholder {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        f.dst.push_str(self.as_str());
        Ok(())
    }
}
