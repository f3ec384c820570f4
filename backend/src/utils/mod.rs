pub mod cookies;
pub mod jwt;

pub use jwt::*;
