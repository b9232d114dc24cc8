//! Error types for the core crate.

/// Errors surfaced while taking in a pair of uploaded files.
///
/// The comparison itself never fails; the only failure is a missing input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// Neither file was supplied.
    #[error("No files were selected")]
    NoFiles,

    /// The first file was not supplied.
    #[error("No file 1 was selected")]
    MissingFirst,

    /// The second file was not supplied.
    #[error("No file 2 was selected")]
    MissingSecond,
}

/// Convenience alias for intake results.
pub type IntakeResult<T> = Result<T, IntakeError>;
