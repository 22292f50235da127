//! Error type shared by the pipeline, the command router and the worker.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported to the host through the command channel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// GPU context or shader program could not be created. Fatal.
    #[error("GPU setup failed: {0}")]
    Setup(String),

    /// Per-point arrays disagree in length; the offending call was rejected.
    #[error("{what} has {found} elements, expected {expected}")]
    DataShape {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A point buffer is larger than the device allows; the upload was rejected.
    #[error("{what} needs {bytes} bytes, device limit is {limit}")]
    BufferTooLarge {
        what: &'static str,
        bytes: u64,
        limit: u64,
    },

    /// A coordinate was NaN or infinite; the dataset was rejected.
    #[error("non-finite {axis} coordinate at index {index}")]
    NonFiniteCoordinate { axis: char, index: usize },

    /// The command tag is not part of the vocabulary.
    #[error("unknown command `{0}`")]
    InvalidCommand(String),

    /// The tag is known but its payload could not be decoded.
    #[error("malformed `{tag}` payload: {reason}")]
    MalformedCommand { tag: String, reason: String },

    /// A pipeline command arrived before `init`.
    #[error("render pipeline is not initialized")]
    NotInitialized,

    /// The presentation surface is gone (commonly out of memory). Fatal.
    #[error("surface error: {0}")]
    Surface(String),

    /// The render thread has exited; no further commands are accepted.
    #[error("render worker is not running")]
    WorkerStopped,
}

impl Error {
    /// Fatal errors stop the render context; everything else is reported and
    /// the context keeps serving commands.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Setup(_) | Error::Surface(_) | Error::WorkerStopped)
    }

    pub(crate) fn setup(err: anyhow::Error) -> Self {
        Error::Setup(format!("{err:#}"))
    }
}
