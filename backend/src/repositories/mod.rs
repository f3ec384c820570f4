pub mod common;
pub mod office;
pub mod request;
pub mod user;

pub use office::{OfficeRepository, OfficeRepositoryTrait};
pub use request::{RequestListFilters, RequestRepository, RequestRepositoryTrait};
pub use user::{UserRepository, UserRepositoryTrait};
