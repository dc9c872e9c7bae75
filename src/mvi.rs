//! One-way state flow for the records store.
//!
//! A command never edits state directly. It emits intents, the store's
//! reducer folds each one into the current snapshot, and the watch channel
//! hands the new snapshot to subscribers.

/// A snapshot subscribers can hold on to.
///
/// `PartialEq` lets the store skip notifications when a reduction changes
/// nothing; `Sync` lets snapshots live in a `tokio::sync::watch` channel.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Something that happened to the store: a command started or settled, the
/// service answered, or a consumer acknowledged a flag.
pub trait Intent: Send + 'static {}

/// Pure `(State, Intent) -> State` transition. The only place state changes.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
