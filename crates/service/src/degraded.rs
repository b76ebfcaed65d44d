use namebook_storage::StorageError;

/// Result of a read that falls back to an empty value when the store fails.
///
/// The failure is logged here and surfaced through `failed`, so callers can
/// tell "nothing there" apart from "could not look".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degraded<T> {
    pub value: T,
    pub failed: bool,
}

impl<T> Degraded<T> {
    pub fn ok(value: T) -> Self {
        Self { value, failed: false }
    }

    pub(crate) fn from_result(
        result: Result<T, StorageError>,
        operation: &'static str,
        fallback: impl FnOnce() -> T,
    ) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(e) => {
                tracing::error!(operation, error = %e, "read failed, serving empty result");
                Self { value: fallback(), failed: true }
            },
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Degraded<U> {
        Degraded { value: f(self.value), failed: self.failed }
    }
}

impl<T: Default> Degraded<T> {
    pub(crate) fn or_default(result: Result<T, StorageError>, operation: &'static str) -> Self {
        Self::from_result(result, operation, T::default)
    }
}
