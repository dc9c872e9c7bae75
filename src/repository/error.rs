use thiserror::Error;

use crate::model::RecordId;

/// Failure half of every repository result. `Display` is the message shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The service could not be reached at all.
    #[error("Could not reach the records service. Check your connection and try again.")]
    Connectivity,

    /// The service answered with a non-2xx status.
    #[error("Error: {code} - {reason}")]
    Status { code: u16, reason: String },

    /// The requested record does not exist, or came back without a body.
    #[error("Record {id} not found")]
    NotFound { id: RecordId },

    /// A 2xx answer without the payload the operation needed.
    #[error("Could not {operation}")]
    Incomplete { operation: Operation },
}

/// Repository operations, used for messages and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    GetOne,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::GetOne => "get_one",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phrase = match self {
            Operation::List => "load records",
            Operation::GetOne => "load record",
            Operation::Create => "create record",
            Operation::Update => "update record",
            Operation::Delete => "delete record",
        };
        f.write_str(phrase)
    }
}
