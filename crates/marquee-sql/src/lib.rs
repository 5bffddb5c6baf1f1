pub mod serializer;
pub use serializer::{compile, render, Serializer};

pub use marquee_core::stmt::{self, Statement};
