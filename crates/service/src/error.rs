//! Typed error enum for the service layer.

use namebook_core::ValidationError;
use namebook_storage::StorageError;
use thiserror::Error;

/// Failure of a service operation, split by who should hear about it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller provided invalid input. Shown to the user as-is.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// A name equal under case folding is already registered.
    #[error("name '{0}' already exists")]
    DuplicateName(String),

    /// Storage operation failed. Logged; the user only sees a generic message.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_transient())
    }

    /// Text safe to show to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => capitalize(&e.to_string()),
            Self::DuplicateName(name) => format!("The name '{name}' already exists."),
            Self::Storage(_) => "Something went wrong while talking to the database. Please try again.".to_owned(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>() + ".",
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_do_not_leak_storage_details() {
        let err = ServiceError::Storage(StorageError::Unavailable("host db-7 refused".to_owned()));
        assert!(!err.user_message().contains("db-7"));
        assert!(err.is_transient());
    }

    #[test]
    fn validation_message_is_sentence_cased() {
        let err = ServiceError::from(ValidationError::MissingField("meaning"));
        assert_eq!(err.user_message(), "Meaning is required.");
    }

    #[test]
    fn duplicate_message_names_the_name() {
        let err = ServiceError::DuplicateName("Ana".to_owned());
        assert_eq!(err.user_message(), "The name 'Ana' already exists.");
        assert!(!err.is_transient());
    }
}
