//! Error types surfaced by the logging pipeline.

use std::path::PathBuf;

/// Errors returned by log providers, the builder, the writer and the registration gate.
///
/// Every failure surfaces to the caller of the failing operation, nothing is retried or swallowed
/// internally. Use [`Error::kind`] when only the category matters.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An argument did not satisfy the operation's contract.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A writer or provider was used after its resources were released.
    #[error("cannot use {component} after it has been released")]
    Disposed {
        /// The released component, e.g. `"log writer"`.
        component: &'static str,
    },

    /// [`LoggerBuilder::build`](crate::LoggerBuilder::build) was called before any provider was configured.
    #[error(
        "no log provider has been configured, use `use_provider` or `use_provider_factory` to configure one"
    )]
    NoProviderConfigured,

    /// A backend was looked up from an external registry but none was registered.
    #[error("no {backend} backend is registered")]
    BackendUnavailable {
        /// Name of the backend that was looked up.
        backend: &'static str,
    },

    /// The backend failed to perform the write.
    #[error("backend write failed")]
    Io(#[from] std::io::Error),

    /// An entry could not be encoded for the backend.
    #[error("failed to encode log entry")]
    Encode(#[from] serde_json::Error),

    /// The logging configuration could not be read.
    #[error("failed to read logging configuration from {path}")]
    ConfigRead {
        /// The configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The logging configuration is malformed.
    #[error("invalid logging configuration")]
    ConfigParse(#[from] toml::de::Error),
}

/// Coarse categories of [`Error`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A caller passed something that violates the operation's contract.
    InvalidArgument,
    /// The operation is not valid in the component's current state.
    InvalidState,
    /// A backend resolution path found nothing registered.
    BackendUnavailable,
    /// The backend itself failed.
    Backend,
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } | Error::ConfigRead { .. } | Error::ConfigParse(_) => {
                ErrorKind::InvalidArgument
            }
            Error::Disposed { .. } | Error::NoProviderConfigured => ErrorKind::InvalidState,
            Error::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
            Error::Io(_) | Error::Encode(_) => ErrorKind::Backend,
        }
    }

    /// Shorthand for [`Error::Disposed`].
    pub fn disposed(component: &'static str) -> Self {
        Error::Disposed { component }
    }
}
