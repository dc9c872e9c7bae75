//! Client configuration: service address, timeouts and default paging.

mod loader;
mod types;

pub use loader::{ConfigError, BASE_URL_ENV, MAX_TIMEOUT_SECONDS};
pub use types::{ClientConfig, PageSettings, TimeoutSettings};
