//! Data models shared across database access and API handlers.

pub mod actor;
pub mod office;
pub mod request;
pub mod user;

/// A TEXT column held a value outside the enum it decodes into.
#[derive(Debug, thiserror::Error)]
#[error("unknown variant `{0}`")]
pub struct UnknownVariant(pub String);
