//! Authentication Module
//! Mission: Password hashing, bearer tokens, and the shared request gate

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, AuthError};
pub use models::User;
pub use user_store::UserStore;
