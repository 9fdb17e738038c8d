use strum::EnumIs;
use thiserror::Error;

use crate::field::Field;

/// Represents errors that can occur while parsing cron expressions and
/// searching for their occurrences.
///
/// The first four variants mean the expression itself is malformed; see
/// [`CronError::is_malformed`].
#[derive(Debug, Clone, PartialEq, Eq, Error, EnumIs)]
pub enum CronError {
    /// The expression was empty or only whitespace.
    #[error("cron expression cannot be an empty string")]
    EmptyExpression,

    /// The expression did not have the number of fields the parser accepts.
    #[error("cron expression must have {expected} fields, found {found}")]
    FieldCount { found: usize, expected: &'static str },

    /// A field contains a character that is never legal in that position.
    #[error("illegal character '{ch}' in {field} field '{token}'")]
    IllegalCharacter {
        field: Field,
        token: String,
        ch: char,
    },

    /// A field is syntactically wrong or names a value outside its range.
    #[error("invalid {field} field: {reason}")]
    InvalidField { field: Field, reason: String },

    /// Calendar arithmetic produced a date that does not exist.
    #[error("encountered an invalid date while searching for an occurrence")]
    InvalidDate,

    /// Calendar arithmetic produced a time that does not exist.
    #[error("encountered an invalid time while searching for an occurrence")]
    InvalidTime,

    /// No matching instant exists within the search horizon.
    ///
    /// Typical for day and month combinations that never happen, such as
    /// the 31st of February.
    #[error("no matching time found within {horizon_years} years")]
    ExhaustedSchedule { horizon_years: u16 },
}

impl CronError {
    /// `true` when the error describes a malformed expression rather than a
    /// failed search.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            CronError::EmptyExpression
                | CronError::FieldCount { .. }
                | CronError::IllegalCharacter { .. }
                | CronError::InvalidField { .. }
        )
    }

    pub(crate) fn invalid_field(field: Field, reason: impl Into<String>) -> Self {
        CronError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
