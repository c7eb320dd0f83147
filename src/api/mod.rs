pub mod rejection;
pub mod routes;

pub use rejection::BodyRejection;
pub use routes::{create_router, ApiError, AppState};
