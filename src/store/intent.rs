use crate::model::Record;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum RecordsIntent {
    /// A command was dispatched. `mutation` is true for create/update,
    /// which also reset `last_op_succeeded`.
    CommandStarted { mutation: bool },
    /// A command settled, whichever way it went.
    CommandFinished,
    ListLoaded(Vec<Record>),
    RecordLoaded(Record),
    MutationSucceeded,
    CommandFailed { message: String },
    ClearError,
    ResetSuccess,
    ClearSelected,
}

impl Intent for RecordsIntent {}
