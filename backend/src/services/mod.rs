pub mod request_scope;
pub mod requests;

pub use request_scope::RequestScope;
pub use requests::RequestService;
