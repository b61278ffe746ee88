use tracing::error;

use crate::error::CoreStoreError;

/// Log a raised error with its domain and code as structured fields.
pub fn log_error(err: &CoreStoreError, message: &str) {
    error!(
        domain = err.domain(),
        code = err.code().raw(),
        kind = err.code().name(),
        error = %err,
        "{message}"
    );
}
