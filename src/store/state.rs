use crate::model::{Record, RecordId};
use crate::mvi::UiState;

/// Everything a records view renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordsState {
    /// Last fetched page, in server order. Replaced wholesale on each fetch.
    pub list: Vec<Record>,
    /// Last fetched single record.
    pub selected: Option<Record>,
    /// True while any command is in flight.
    pub loading: bool,
    /// Message of the latest failure, kept until acknowledged.
    pub error: Option<String>,
    /// Set by a successful create or update; cleared only by the consumer
    /// or by the start of the next create/update.
    pub last_op_succeeded: bool,
    pub(crate) in_flight: usize,
}

impl UiState for RecordsState {}

impl RecordsState {
    /// Number of commands currently awaiting the repository.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.list.iter().find(|record| record.id == id)
    }
}
