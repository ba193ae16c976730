use thiserror::Error;

/// Errors produced while handling a request.
///
/// The four variants mirror the stages of a run: request parsing, source
/// loading, per-operation validation, and per-operation execution. The first
/// two abort the run before any operation executes; the last two are confined
/// to the operation that raised them.
#[derive(Error, Debug)]
pub enum ArionError {
    #[error("invalid request: {0}")]
    Request(String),
    #[error("failed to load source image: {0}")]
    SourceLoad(String),
    #[error("{0}")]
    InvalidParams(String),
    #[error("{0}")]
    Execution(String),
}

impl ArionError {
    /// Whether this error aborts the whole run (as opposed to a single
    /// operation).
    pub fn is_fatal(&self) -> bool {
        matches!(self, ArionError::Request(_) | ArionError::SourceLoad(_))
    }
}
