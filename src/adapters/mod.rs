// Adapters layer: concrete implementations for external systems (remote API, local filesystem).

pub mod http;
pub mod storage;

pub use http::ApiClient;
pub use storage::LocalStorage;
