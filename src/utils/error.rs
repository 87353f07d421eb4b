use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Property '{name}' on '{class}' conflicts with the declaration inherited from '{inherited_from}'")]
    DuplicateProperty {
        class: String,
        name: String,
        inherited_from: String,
    },

    #[error("Model class '{name}' is already defined")]
    DuplicateClass { name: String },

    #[error("Unknown model class '{name}'")]
    UnknownClass { name: String },

    #[error("Cannot instantiate abstract model class '{class}'")]
    AbstractInstantiation { class: String },

    #[error("'{class}' accepts at most {expected} positional argument(s), got {given}")]
    Arity {
        class: String,
        expected: usize,
        given: usize,
    },

    #[error("'{class}' received more than one value for property '{name}'")]
    ConflictingArgument { class: String, name: String },

    #[error("'{class}' has no property named '{name}'")]
    UnknownProperty { class: String, name: String },

    #[error("'{class}' requires a value for property '{name}'")]
    MissingRequiredProperty { class: String, name: String },

    #[error("Invalid value for '{class}.{property}': expected {expected}, got {actual}")]
    TypeConstraint {
        class: String,
        property: String,
        expected: String,
        actual: String,
    },

    #[error("Document entry #{index} failed: {source}")]
    DocumentEntry {
        index: usize,
        #[source]
        source: Box<ModelError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Schema,
    Construction,
    Validation,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ModelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ModelError::DuplicateProperty { .. }
            | ModelError::DuplicateClass { .. }
            | ModelError::UnknownClass { .. } => ErrorCategory::Schema,
            ModelError::AbstractInstantiation { .. }
            | ModelError::Arity { .. }
            | ModelError::ConflictingArgument { .. }
            | ModelError::UnknownProperty { .. }
            | ModelError::MissingRequiredProperty { .. } => ErrorCategory::Construction,
            ModelError::TypeConstraint { .. } => ErrorCategory::Validation,
            ModelError::DocumentEntry { source, .. } => source.category(),
            ModelError::IoError(_) | ModelError::SerializationError(_) => ErrorCategory::Io,
            ModelError::ConfigError { .. } | ModelError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // Schema errors mean the built-in catalogue itself is broken.
            ErrorCategory::Schema => ErrorSeverity::Critical,
            ErrorCategory::Construction | ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ModelError::DuplicateProperty { name, .. } => format!(
                "Rename '{}' or redeclare it with the inherited constraint",
                name
            ),
            ModelError::DuplicateClass { name } => {
                format!("Define '{}' only once per registry", name)
            }
            ModelError::UnknownClass { name } => format!(
                "Check the spelling of '{}' or define its parent class first",
                name
            ),
            ModelError::AbstractInstantiation { class } => {
                format!("Use a concrete subclass of '{}'", class)
            }
            ModelError::Arity { .. } => {
                "Pass at most one positional value, other values by name".to_string()
            }
            ModelError::ConflictingArgument { name, .. } => {
                format!("Supply '{}' either positionally or by name, not both", name)
            }
            ModelError::UnknownProperty { class, .. } => {
                format!("Run with --list-classes to see the properties of '{}'", class)
            }
            ModelError::MissingRequiredProperty { name, .. } => {
                format!("Add a value for '{}'", name)
            }
            ModelError::TypeConstraint { expected, .. } => {
                format!("Provide a value matching {}", expected)
            }
            ModelError::DocumentEntry { source, .. } => source.recovery_suggestion(),
            ModelError::IoError(_) => "Check the file path and its permissions".to_string(),
            ModelError::SerializationError(_) => {
                "Check that the document is well-formed JSON".to_string()
            }
            ModelError::ConfigError { .. } | ModelError::InvalidConfigValueError { .. } => {
                "Review the command line arguments and document file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ModelError::DocumentEntry { index, source } => {
                format!("Model #{} could not be built: {}", index, source)
            }
            ModelError::IoError(e) => format!("Could not access a file: {}", e),
            other => other.to_string(),
        }
    }

    pub(crate) fn in_entry(self, index: usize) -> Self {
        ModelError::DocumentEntry {
            index,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
