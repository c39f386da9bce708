use std::path::PathBuf;

/// Result type alias for cf-vault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cf-vault operations
///
/// Every variant is terminal for an invocation. The binary renders the
/// `Display` text once and exits with [`Error::exit_code`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required positional argument missing
    #[error("{message}")]
    Usage { message: String },

    /// Service instance resolution failed
    #[error("error getting service '{name}': {message}")]
    ServiceNotFound { name: String, message: String },

    /// Access token could not be read from the platform session
    #[error("error getting user access token: {message}")]
    AuthToken { message: String },

    /// API endpoint could not be read from the platform session
    #[error("error getting API endpoint: {message}")]
    Endpoint { message: String },

    /// HTTP request could not be issued or completed
    #[error("error fetching '{endpoint}': {message}")]
    Transport { endpoint: String, message: String },

    /// HTTP request answered with something other than 200
    #[error("did not get 200 status back from '{endpoint}': {status}")]
    UnexpectedStatus { endpoint: String, status: String },

    /// Response body did not match the expected shape
    #[error("error decoding response for {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service instance has no service keys bound
    #[error("no service keys found. create one with: cf create-service-key {service} my-key")]
    NoServiceKey { service: String },

    /// The secrets tool could not be started
    #[error("error running {command} command: {message}")]
    SubprocessLaunch { command: String, message: String },

    /// The secrets tool ran but did not exit successfully
    #[error("{}", format_subprocess_failure(.command, .exit_code))]
    SubprocessFailure {
        command: String,
        exit_code: Option<i32>,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON deserialization errors outside the broker protocol
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

fn format_subprocess_failure(command: &str, exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("error running {command} command: exit status {code}"),
        None => format!("error running {command} command: terminated by signal"),
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a usage error
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage {
            message: message.into(),
        }
    }

    /// Create a service lookup error
    #[must_use]
    pub fn service_not_found(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ServiceNotFound {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an access token error
    #[must_use]
    pub fn auth_token(message: impl Into<String>) -> Self {
        Error::AuthToken {
            message: message.into(),
        }
    }

    /// Create an API endpoint error
    #[must_use]
    pub fn endpoint(message: impl Into<String>) -> Self {
        Error::Endpoint {
            message: message.into(),
        }
    }

    /// Create a transport error
    #[must_use]
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected status error
    #[must_use]
    pub fn unexpected_status(endpoint: impl Into<String>, status: impl Into<String>) -> Self {
        Error::UnexpectedStatus {
            endpoint: endpoint.into(),
            status: status.into(),
        }
    }

    /// Create a decode error
    #[must_use]
    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Decode {
            what: what.into(),
            source,
        }
    }

    /// Create a missing service key error
    #[must_use]
    pub fn no_service_key(service: impl Into<String>) -> Self {
        Error::NoServiceKey {
            service: service.into(),
        }
    }

    /// Create a subprocess launch error
    #[must_use]
    pub fn subprocess_launch(command: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SubprocessLaunch {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a subprocess failure error
    #[must_use]
    pub fn subprocess_failure(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        Error::SubprocessFailure {
            command: command.into(),
            exit_code,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Exit status the binary should terminate with for this error.
    ///
    /// A failed `vault` run mirrors the child's own code; anything else is 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::SubprocessFailure {
                exit_code: Some(code),
                ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
