//! Error types for the command-line tool

use thiserror::Error;

/// Failures reported by commands after their output is written
#[derive(Debug, Error)]
pub enum CliError {
    /// Some files of a batch could not be processed
    #[error("{failed} of {total} files failed")]
    BatchFailed {
        /// Files that failed
        failed: usize,
        /// Files in the batch
        total: usize,
    },
}

/// Turn a batch tally into a result
pub fn batch_result(failed: usize, total: usize) -> Result<(), CliError> {
    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::BatchFailed { failed, total })
    }
}
