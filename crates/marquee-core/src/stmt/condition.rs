/// Logical operator joining the operands of a [`ConditionGroup`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// A node of a WHERE tree.
///
/// Predicates are raw SQL fragments. They must reference values only through
/// placeholders (`movie.id = :movie_id`); predicate text is never escaped.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Predicate(String),
    Group(ConditionGroup),
}

/// An operator applied to an ordered list of operands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConditionGroup {
    pub op: LogicalOp,
    pub operands: Vec<Condition>,
}

impl Condition {
    pub fn predicate(sql: impl Into<String>) -> Condition {
        Condition::Predicate(sql.into())
    }

    pub fn and<I>(operands: I) -> Condition
    where
        I: IntoIterator,
        I::Item: Into<Condition>,
    {
        ConditionGroup::new(LogicalOp::And, operands).into()
    }

    pub fn or<I>(operands: I) -> Condition
    where
        I: IntoIterator,
        I::Item: Into<Condition>,
    {
        ConditionGroup::new(LogicalOp::Or, operands).into()
    }

    /// Returns `true` if the condition would render as an empty fragment.
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::Predicate(sql) => sql.is_empty(),
            Condition::Group(group) => group.is_empty(),
        }
    }

    pub fn as_group(&self) -> Option<&ConditionGroup> {
        match self {
            Condition::Group(group) => Some(group),
            _ => None,
        }
    }
}

impl ConditionGroup {
    pub fn new<I>(op: LogicalOp, operands: I) -> ConditionGroup
    where
        I: IntoIterator,
        I::Item: Into<Condition>,
    {
        ConditionGroup {
            op,
            operands: operands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and() -> ConditionGroup {
        ConditionGroup::default()
    }

    pub fn or() -> ConditionGroup {
        ConditionGroup {
            op: LogicalOp::Or,
            operands: vec![],
        }
    }

    pub fn push(&mut self, operand: impl Into<Condition>) {
        self.operands.push(operand.into());
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    /// Returns `true` if no operand renders to a non-empty fragment.
    pub fn is_empty(&self) -> bool {
        self.operands.iter().all(Condition::is_empty)
    }

    /// Operands of `other` are appended after ours; `other`'s operator is
    /// ignored.
    pub(crate) fn concat(&self, other: &ConditionGroup) -> ConditionGroup {
        ConditionGroup {
            op: self.op,
            operands: self
                .operands
                .iter()
                .chain(other.operands.iter())
                .cloned()
                .collect(),
        }
    }
}

impl From<ConditionGroup> for Condition {
    fn from(value: ConditionGroup) -> Self {
        Condition::Group(value)
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        Condition::Predicate(value.to_string())
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::Predicate(value)
    }
}

impl<'a> IntoIterator for &'a ConditionGroup {
    type IntoIter = std::slice::Iter<'a, Condition>;
    type Item = &'a Condition;

    fn into_iter(self) -> Self::IntoIter {
        self.operands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_detection_is_recursive() {
        let cond = Condition::and([Condition::or(Vec::<Condition>::new()), "".into()]);
        assert!(cond.is_empty());

        let cond = Condition::and([Condition::or(["a = :a"]), "".into()]);
        assert!(!cond.is_empty());
    }

    #[test]
    fn default_operator_is_and() {
        assert_eq!(ConditionGroup::default().op, LogicalOp::And);
    }
}
