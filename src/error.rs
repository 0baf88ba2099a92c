//! Error kinds of the todo store.
//!
//! Every failure in codec, table or store surfaces as a `TodoError`; the
//! binary wraps it into `anyhow` and exits non-zero.

use std::io;
use std::path::Path;

use thiserror::Error;

pub type Result<T, E = TodoError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TodoError {
    /// Row does not have exactly 4 fields.
    #[error("invalid length for todo record: {fields} fields, expected 4")]
    Format { fields: usize },

    /// A field has the right position but an unparsable value.
    #[error("invalid {field} field {value:?}: {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("duplicate id '{0}'")]
    DuplicateId(u64),

    #[error("no todo with id '{0}'")]
    NotFound(u64),

    /// Largest id in use is `u64::MAX`; no greater id can be assigned.
    #[error("no free id after '{0}'")]
    IdSpaceExhausted(u64),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Malformed CSV that is not an I/O failure (e.g. invalid UTF-8).
    #[error("malformed csv data")]
    Csv(#[source] csv::Error),
}

impl TodoError {
    pub(crate) fn parse(field: &'static str, value: &str, reason: impl ToString) -> Self {
        TodoError::Parse {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Attach "<op> <path>" to an I/O error.
    pub(crate) fn io(op: &str, path: &Path, source: io::Error) -> Self {
        TodoError::Io {
            context: format!("{} {}", op, path.display()),
            source,
        }
    }

    /// csv wraps I/O errors of the underlying reader/writer; unwrap them so
    /// callers see a plain `Io` for those.
    pub(crate) fn csv(op: &str, path: &Path, err: csv::Error) -> Self {
        if err.is_io_error() {
            TodoError::io(op, path, io::Error::from(err))
        } else {
            TodoError::Csv(err)
        }
    }
}

/// Extension trait mirroring anyhow's `with_context` for `io::Result`.
pub(crate) trait IoContext<T> {
    fn with_path(self, op: &str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn with_path(self, op: &str, path: &Path) -> Result<T> {
        self.map_err(|e| TodoError::io(op, path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_error_keeps_context_and_source() {
        let err = TodoError::io(
            "open",
            Path::new("todo_data.csv"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "open todo_data.csv");
        assert_eq!(err.source().map(|s| s.to_string()), Some("denied".into()));
    }

    #[test]
    fn csv_io_errors_become_io() {
        let inner = csv::Error::from(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        let err = TodoError::csv("read", Path::new("x.csv"), inner);
        assert!(matches!(err, TodoError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn parse_message_names_field() {
        let err = TodoError::parse("completed", "maybe", "not a boolean");
        assert_eq!(
            err.to_string(),
            "invalid completed field \"maybe\": not a boolean"
        );
    }
}
