//! Record shapes exchanged with the records service.

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier. `0` means "not yet persisted".
pub type RecordId = i64;

/// Accepted age range, inclusive.
pub const AGE_RANGE: std::ops::RangeInclusive<i32> = 15..=100;

/// Accepted GPA range, inclusive.
pub const GPA_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Maximum length of the name and major fields, in characters.
pub const MAX_TEXT_LEN: usize = 100;

/// A student record as persisted by the service.
///
/// `id` and `registered_at` are assigned by the server and never rewritten
/// on the client; `registered_at` is kept verbatim as the server sent it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub age: i32,
    pub major: String,
    pub gpa: f64,
    pub registered_at: String,
}

impl Record {
    /// Whether the server has assigned an identity to this record.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// Body for create and update calls. Carries no identity and no
/// server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRequest {
    pub name: String,
    pub age: i32,
    pub major: String,
    pub gpa: f64,
}

impl From<&Record> for RecordRequest {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            age: record.age,
            major: record.major.clone(),
            gpa: record.gpa,
        }
    }
}

/// A single field rejected by [`RecordRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl RecordRequest {
    /// Check the fields against the ranges the service enforces.
    ///
    /// Form layers call this before handing a request to the store; the
    /// store itself sends whatever it is given.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        check_text("name", &self.name, &mut errors);
        check_text("major", &self.major, &mut errors);

        if !AGE_RANGE.contains(&self.age) {
            errors.push(FieldError {
                field: "age",
                message: format!(
                    "must be between {} and {}",
                    AGE_RANGE.start(),
                    AGE_RANGE.end()
                ),
            });
        }

        if !self.gpa.is_finite() || !GPA_RANGE.contains(&self.gpa) {
            errors.push(FieldError {
                field: "gpa",
                message: format!(
                    "must be between {} and {}",
                    GPA_RANGE.start(),
                    GPA_RANGE.end()
                ),
            });
        }

        errors
    }
}

fn check_text(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.push(FieldError {
            field,
            message: "must not be empty".to_string(),
        });
    } else if value.chars().count() > MAX_TEXT_LEN {
        errors.push(FieldError {
            field,
            message: format!("must be at most {} characters", MAX_TEXT_LEN),
        });
    }
}
