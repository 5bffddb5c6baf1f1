#[macro_use]
mod macros;

pub mod driver;
pub use driver::Connection;

mod error;
pub use error::{Error, IntoError};

pub mod group;
pub use group::{group, Entity, Grouping, Relation};

pub mod stmt;
pub use stmt::Statement;

/// A Result type alias that uses Marquee's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
