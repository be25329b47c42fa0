mod api;
pub use api::TaskApi;

mod config;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TASKS_PATH};

mod errors;
pub use errors::ClientError;

mod http;
pub use http::HttpTaskClient;
