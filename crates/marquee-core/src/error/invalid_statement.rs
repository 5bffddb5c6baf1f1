use super::Error;

/// Error when a statement descriptor is malformed.
///
/// This occurs when:
/// - A statement names no table
/// - A select lists no columns, or an insert/update carries no values
/// - Batch insert records do not share the same columns
/// - Two statements of different kinds are merged
///
/// These are caught before any SQL text is produced, so a malformed
/// descriptor never reaches the database as a partial statement.
#[derive(Debug)]
pub(super) struct InvalidStatement {
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidStatement {}

impl core::fmt::Display for InvalidStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid statement: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid statement error.
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatement {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid statement error.
    pub fn is_invalid_statement(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidStatement(_))
    }
}
