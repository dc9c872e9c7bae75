//! Outcome normalization over the remote client.
//!
//! Every call ends in `Ok(value)` or `Err(RepositoryError)`; transport,
//! status and payload problems are all folded into the error side, with a
//! message fit to show the user.

mod error;

pub use error::{Operation, RepositoryError};

use tracing::warn;

use crate::model::{Record, RecordId, RecordRequest};
use crate::remote::{RecordsApi, RemoteError};

/// Uniform two-variant result returned by every repository call.
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Wraps a [`RecordsApi`] implementation and owns it.
pub struct Repository<A> {
    api: A,
}

impl<A: RecordsApi> Repository<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn list(&self, skip: u32, limit: u32) -> RepoResult<Vec<Record>> {
        self.api
            .list(skip, limit)
            .await
            .map_err(|e| classify(Operation::List, None, e))
    }

    pub async fn get_one(&self, id: RecordId) -> RepoResult<Record> {
        self.api
            .get_one(id)
            .await
            .map_err(|e| classify(Operation::GetOne, Some(id), e))
    }

    pub async fn create(&self, request: &RecordRequest) -> RepoResult<Record> {
        self.api
            .create(request)
            .await
            .map_err(|e| classify(Operation::Create, None, e))
    }

    pub async fn update(&self, id: RecordId, request: &RecordRequest) -> RepoResult<Record> {
        self.api
            .update(id, request)
            .await
            .map_err(|e| classify(Operation::Update, Some(id), e))
    }

    pub async fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.api
            .delete(id)
            .await
            .map_err(|e| classify(Operation::Delete, Some(id), e))
    }
}

/// Map a remote failure to the message the user sees.
///
/// A 404 on a single fetch reads as "not found" rather than a bare status,
/// as does a single fetch that came back without a usable record.
fn classify(operation: Operation, id: Option<RecordId>, err: RemoteError) -> RepositoryError {
    warn!(operation = operation.name(), id = ?id, error = %err, "Records call failed");

    match (err, operation, id) {
        (RemoteError::Status { status: 404, .. }, Operation::GetOne, Some(id)) => {
            RepositoryError::NotFound { id }
        }
        (RemoteError::Status { status, reason }, _, _) => RepositoryError::Status {
            code: status,
            reason,
        },
        (RemoteError::EmptyBody | RemoteError::Decode(_), Operation::GetOne, Some(id)) => {
            RepositoryError::NotFound { id }
        }
        (RemoteError::EmptyBody | RemoteError::Decode(_), operation, _) => {
            RepositoryError::Incomplete { operation }
        }
        (
            RemoteError::Transport(_) | RemoteError::InvalidBaseUrl { .. } | RemoteError::Build(_),
            _,
            _,
        ) => RepositoryError::Connectivity,
    }
}
