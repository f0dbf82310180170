//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by code outside this crate (target constructors, loaders)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for metadata compilation and activation
#[derive(Error, Debug)]
pub enum Error {
    /// Target type is not registered, is gated out of the current context,
    /// or an activation key matches zero or several targets
    #[error("Invalid target: {message}")]
    InvalidTarget {
        /// Description of the target problem
        message: String,
    },

    /// Target definition is malformed (constructor markers, parameter roles,
    /// converter references, permanent constructor shapes)
    #[error("Invalid definition: {message}")]
    InvalidDefinition {
        /// Description of the definition problem
        message: String,
    },

    /// Invalid argument supplied to, or declared on, a constructor
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// An exposed parameter has no matching argument in the activation
    #[error("Missing argument: {name}")]
    KeyNotFound {
        /// Declared name of the parameter
        name: String,
    },

    /// Resource not found error (variable, dependency, entity identifier)
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// A variable was requested at a type incompatible with its stored value
    #[error("Type mismatch for '{name}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Variable name
        name: String,
        /// Requested type
        expected: String,
        /// Stored value shape
        found: String,
    },

    /// A key is already bound (variable name or dependency type)
    #[error("Duplicate key: {key}")]
    DuplicateKey {
        /// The key that is already bound
        key: String,
    },

    /// Attempt to overwrite a constant variable
    #[error("Variable '{name}' is constant")]
    Immutable {
        /// Variable name
        name: String,
    },

    /// The target's own constructor failed
    #[error("Target '{target}' failed during construction: {source}")]
    TargetFailure {
        /// Display key of the target being constructed
        target: String,
        /// The error raised by the constructor
        #[source]
        source: BoxError,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },
}

// Target and definition error creation methods
impl Error {
    /// Create an invalid target error
    pub fn invalid_target<S: Into<String>>(message: S) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    /// Create an invalid definition error
    pub fn invalid_definition<S: Into<String>>(message: S) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a target failure wrapping the constructor's error
    pub fn target_failure<S: Into<String>>(target: S, source: BoxError) -> Self {
        Self::TargetFailure {
            target: target.into(),
            source,
        }
    }
}

// Lookup error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a missing argument error
    pub fn key_not_found<S: Into<String>>(name: S) -> Self {
        Self::KeyNotFound { name: name.into() }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<N, E, F>(name: N, expected: E, found: F) -> Self
    where
        N: Into<String>,
        E: Into<String>,
        F: Into<String>,
    {
        Self::TypeMismatch {
            name: name.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a duplicate key error
    pub fn duplicate_key<S: Into<String>>(key: S) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Create an immutable variable error
    pub fn immutable<S: Into<String>>(name: S) -> Self {
        Self::Immutable { name: name.into() }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
