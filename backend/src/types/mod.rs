//! Strongly typed identifiers shared by models, repositories, and handlers.

pub mod id;

pub use id::*;
