use super::Error;

/// Error when the compiler generates a placeholder that is already bound.
///
/// Callers own the placeholder names they put in filters. Generated names are
/// derived from column names, so a caller binding such as `:name_1` next to an
/// update of `name` collides. The compiler reports this rather than picking a
/// winner.
#[derive(Debug)]
pub(super) struct BindingCollision {
    placeholder: Box<str>,
}

impl std::error::Error for BindingCollision {}

impl core::fmt::Display for BindingCollision {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "binding collision: placeholder `{}` is already bound",
            self.placeholder
        )
    }
}

impl Error {
    /// Creates a binding collision error for the given placeholder.
    pub fn binding_collision(placeholder: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::BindingCollision(BindingCollision {
            placeholder: placeholder.into().into(),
        }))
    }

    /// Returns `true` if this error is a binding collision.
    pub fn is_binding_collision(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::BindingCollision(_))
    }
}
