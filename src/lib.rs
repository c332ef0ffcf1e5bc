mod auth;
mod client;
mod error;
mod response;
pub mod types;
pub use self::auth::Credentials;
pub use self::client::Client;
pub use self::error::{ApiError, ApiErrorKind, Error};
pub use self::response::Response;
