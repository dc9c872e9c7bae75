use std::future::Future;

use crate::model::{Record, RecordId, RecordRequest};
use crate::remote::error::RemoteError;

/// The five calls the records service exposes.
///
/// Implemented over HTTP by [`RemoteClient`](super::RemoteClient); tests
/// substitute in-process fakes.
pub trait RecordsApi: Send + Sync + 'static {
    /// `GET records/?skip=&limit=`. Order is the server's.
    fn list(
        &self,
        skip: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Record>, RemoteError>> + Send;

    /// `GET records/{id}`.
    fn get_one(&self, id: RecordId) -> impl Future<Output = Result<Record, RemoteError>> + Send;

    /// `POST records/`.
    fn create(
        &self,
        request: &RecordRequest,
    ) -> impl Future<Output = Result<Record, RemoteError>> + Send;

    /// `PUT records/{id}`.
    fn update(
        &self,
        id: RecordId,
        request: &RecordRequest,
    ) -> impl Future<Output = Result<Record, RemoteError>> + Send;

    /// `DELETE records/{id}`. Success carries no payload.
    fn delete(&self, id: RecordId) -> impl Future<Output = Result<(), RemoteError>> + Send;
}
