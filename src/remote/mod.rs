//! Transport layer for the records service.
//!
//! [`RecordsApi`] is the seam the repository is generic over;
//! [`RemoteClient`] is the HTTP implementation of it.

mod api;
mod client;
mod error;
mod timeout;

pub use api::RecordsApi;
pub use client::{RemoteClient, RECORDS_PATH};
pub use error::RemoteError;
pub use timeout::TimeoutConfig;
