//! Client for the student records service.
//!
//! Layers, leaf first:
//! - [`model`]: record and request shapes
//! - [`remote`]: HTTP calls against the service
//! - [`repository`]: folds every call outcome into a uniform result
//! - [`store`]: observable state and the commands that drive it

pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod remote;
pub mod repository;
pub mod store;

pub use model::{Record, RecordId, RecordRequest};
pub use remote::{RecordsApi, RemoteClient, RemoteError};
pub use repository::{RepoResult, Repository, RepositoryError};
pub use store::{RecordsState, RecordsStore};
