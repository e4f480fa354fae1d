// error.rs — Error types for the goal tracker.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can end (or interrupt) a goal-setting session.
#[derive(Debug, Error)]
pub enum GoalError {
    /// Today is not the first day of the month.
    #[error("This program only runs on the first day of the month (today is {today}).")]
    WrongDay { today: NaiveDate },

    /// A session already completed today.
    #[error("You have already set your goals for this month. Come back on {next_eligible}.")]
    AlreadyUpdated { next_eligible: NaiveDate },

    /// The state file exists but does not hold a valid state document.
    #[error(
        "state file {path} is corrupted: {source}\n\
         Please delete the state file and restart the program."
    )]
    CorruptedState {
        path: String,
        source: serde_json::Error,
    },

    /// A numeric answer could not be parsed. Recoverable: the prompt is repeated.
    #[error("'{input}' is not a valid number for {field}")]
    InvalidNumber { field: &'static str, input: String },

    /// Input ended while a prompt was still waiting for an answer.
    #[error("input closed before the session finished")]
    InputClosed,

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize state data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GoalError {
    /// Process exit code for this error. Every session-ending error maps to 1.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// True for the two date-gate refusals, which are expected outcomes
    /// rather than failures worth logging at error level.
    pub fn is_gate_refusal(&self) -> bool {
        matches!(
            self,
            GoalError::WrongDay { .. } | GoalError::AlreadyUpdated { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupted_state_message_tells_user_to_delete_file() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = GoalError::CorruptedState {
            path: "state.json".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("state.json"));
        assert!(msg.contains("Please delete the state file and restart the program."));
        assert_eq!(err.exit_code(), 1);
        assert!(!err.is_gate_refusal());
    }

    #[test]
    fn already_updated_names_next_date() {
        let err = GoalError::AlreadyUpdated {
            next_eligible: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        };
        assert!(err.to_string().contains("2024-03-31"));
        assert!(err.is_gate_refusal());
    }
}
