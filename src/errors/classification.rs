use super::types::FuzzgateError;

/// The four failure kinds callers of the fuzzer module can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidParameter,
    PluginError,
    NotSupported,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::InvalidParameter => "InvalidParameter",
            Self::PluginError => "PluginError",
            Self::NotSupported => "NotSupported",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FuzzgateError {
    /// Collapse this error onto the kind surfaced to callers.
    ///
    /// Anything that is not one of the explicit kinds is an internal or
    /// external-dependency failure and reports as `PluginError`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FuzzgateError::NotFound(_) => ErrorKind::NotFound,
            FuzzgateError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            FuzzgateError::NotSupported(_) => ErrorKind::NotSupported,
            FuzzgateError::Plugin(_)
            | FuzzgateError::Config(_)
            | FuzzgateError::Database(_)
            | FuzzgateError::Runner(_)
            | FuzzgateError::Network(_)
            | FuzzgateError::Io(_)
            | FuzzgateError::Json(_)
            | FuzzgateError::Yaml(_)
            | FuzzgateError::Internal(_) => ErrorKind::PluginError,
        }
    }

    /// Wrap a capability failure so it surfaces as `PluginError`, keeping the
    /// explicit kinds untouched.
    pub fn into_plugin(self) -> FuzzgateError {
        match self.kind() {
            ErrorKind::PluginError => match self {
                FuzzgateError::Plugin(_) => self,
                other => FuzzgateError::Plugin(other.to_string()),
            },
            _ => self,
        }
    }
}
