//! Field rules shared by request payloads. Payload structs attach them with
//! `#[validate(custom(function = "..."))]`.

pub mod rules;

pub use validator::Validate;
