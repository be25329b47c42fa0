mod error;
pub use error::ApiError;

mod handler;
pub use handler::TaskHandler;

mod store;
pub use store::MemoryStore;

mod sqlite;
pub use sqlite::SqliteStore;

mod http;
pub use http::{API_VERSION, HttpApi};

pub use axum;
