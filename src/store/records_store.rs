use std::sync::Arc;

use scopeguard::ScopeGuard;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::PageSettings;
use crate::model::{Record, RecordId, RecordRequest};
use crate::mvi::Reducer;
use crate::remote::RecordsApi;
use crate::repository::{RepoResult, Repository, RepositoryError};
use crate::store::intent::RecordsIntent;
use crate::store::reducer::RecordsReducer;
use crate::store::state::RecordsState;

/// Holds the observable [`RecordsState`] and sequences repository calls.
///
/// Every command follows the same protocol:
/// 1. mark the command in flight (`loading = true`, `error` cleared, and
///    for create/update `last_op_succeeded = false`);
/// 2. await the repository;
/// 3. on success apply the command's mutation, on failure record the
///    message in `error` and leave everything else as it was;
/// 4. release the in-flight mark, even if the command panics or its future
///    is dropped before completion.
///
/// Create, update and delete refresh the whole list from the service after
/// a success instead of patching it locally; the mutating command settles
/// only once that refresh has settled.
///
/// Commands are not exclusive. Two overlapping fetches both write their
/// result and the one that completes last wins, regardless of issue order.
/// No command cancels another.
///
/// Cloning is cheap and every clone shares the same state.
pub struct RecordsStore<A> {
    inner: Arc<StoreInner<A>>,
}

struct StoreInner<A> {
    repository: Repository<A>,
    state: watch::Sender<RecordsState>,
    page: PageSettings,
}

impl<A> Clone for RecordsStore<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: RecordsApi> RecordsStore<A> {
    pub fn new(repository: Repository<A>) -> Self {
        Self::with_page(repository, PageSettings::default())
    }

    /// Create a store whose [`load_list`](Self::load_list) uses `page`.
    pub fn with_page(repository: Repository<A>, page: PageSettings) -> Self {
        let (state, _) = watch::channel(RecordsState::default());
        Self {
            inner: Arc::new(StoreInner {
                repository,
                state,
                page,
            }),
        }
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<RecordsState> {
        self.inner.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> RecordsState {
        self.inner.state.borrow().clone()
    }

    pub fn page(&self) -> PageSettings {
        self.inner.page
    }

    pub fn repository(&self) -> &Repository<A> {
        &self.inner.repository
    }

    /// Fetch the configured page and replace `list` with it.
    pub async fn load_list(&self) -> RepoResult<()> {
        let page = self.inner.page;
        self.load_page(page.skip, page.limit).await
    }

    /// Fetch an explicit page and replace `list` with it.
    pub async fn load_page(&self, skip: u32, limit: u32) -> RepoResult<()> {
        let _guard = self.begin(false);
        info!(skip, limit, "Loading records");

        match self.inner.repository.list(skip, limit).await {
            Ok(list) => {
                info!(count = list.len(), "Records loaded");
                self.dispatch(RecordsIntent::ListLoaded(list));
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Fetch one record and make it the `selected` one.
    pub async fn load_one(&self, id: RecordId) -> RepoResult<Record> {
        let _guard = self.begin(false);
        info!(id, "Loading record");

        match self.inner.repository.get_one(id).await {
            Ok(record) => {
                self.dispatch(RecordsIntent::RecordLoaded(record.clone()));
                Ok(record)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Create a record, flag success, then refresh the list.
    ///
    /// Returns the record as the service stored it. A failing refresh does
    /// not turn the create into a failure; it shows up in `error`.
    pub async fn create(&self, request: RecordRequest) -> RepoResult<Record> {
        let _guard = self.begin(true);
        info!(name = %request.name, "Creating record");

        match self.inner.repository.create(&request).await {
            Ok(created) => {
                info!(id = created.id, "Record created");
                self.dispatch(RecordsIntent::MutationSucceeded);
                self.refresh().await;
                Ok(created)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Update a record, flag success, then refresh the list.
    pub async fn update(&self, id: RecordId, request: RecordRequest) -> RepoResult<Record> {
        let _guard = self.begin(true);
        info!(id, "Updating record");

        match self.inner.repository.update(id, &request).await {
            Ok(updated) => {
                info!(id, "Record updated");
                self.dispatch(RecordsIntent::MutationSucceeded);
                self.refresh().await;
                Ok(updated)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Delete a record, then refresh the list. Does not touch
    /// `last_op_succeeded`.
    pub async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let _guard = self.begin(false);
        info!(id, "Deleting record");

        match self.inner.repository.delete(id).await {
            Ok(()) => {
                info!(id, "Record deleted");
                self.refresh().await;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Acknowledge the current error.
    pub fn clear_error(&self) {
        self.dispatch(RecordsIntent::ClearError);
    }

    /// Acknowledge a create/update success.
    pub fn reset_success(&self) {
        self.dispatch(RecordsIntent::ResetSuccess);
    }

    /// Drop the selected record, e.g. before opening an empty create form.
    pub fn clear_selected(&self) {
        self.dispatch(RecordsIntent::ClearSelected);
    }

    /// Mark a command in flight; the returned guard marks it finished when
    /// dropped.
    fn begin<'a>(&'a self, mutation: bool) -> ScopeGuard<&'a Self, impl FnOnce(&'a Self) + 'a> {
        self.dispatch(RecordsIntent::CommandStarted { mutation });
        scopeguard::guard(self, |store: &'a Self| {
            store.dispatch(RecordsIntent::CommandFinished)
        })
    }

    async fn refresh(&self) {
        // A failed refresh has already written `error`.
        if self.load_list().await.is_err() {
            warn!("List refresh after mutation failed");
        }
    }

    fn fail(&self, err: RepositoryError) -> RepositoryError {
        self.dispatch(RecordsIntent::CommandFailed {
            message: err.to_string(),
        });
        err
    }

    fn dispatch(&self, intent: RecordsIntent) {
        self.inner.state.send_if_modified(|state| {
            let next = RecordsReducer::reduce(state.clone(), intent);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
    }
}
