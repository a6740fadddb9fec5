// Crate-wide result alias for ergonomics (non-conflicting)
pub type ApertureResult<T> = std::result::Result<T, ApertureError>;

/// Typed aperture errors that can be converted into `sea_orm::DbErr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApertureError {
    /// A request-supplied selection string with unbalanced parentheses.
    MalformedSelection {
        detail: String,
    },
    /// An entity name that was never registered with the graph.
    EntityNotRegistered {
        entity: String,
    },

    // Configuration errors
    MissingConfiguration {
        component: String,
        required: String,
    },
    InvalidConfiguration {
        component: String,
        message: String,
    },
}

impl core::fmt::Display for ApertureError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApertureError::MalformedSelection { detail } => {
                write!(f, "ApertureError::MalformedSelection: {}", detail)
            }
            ApertureError::EntityNotRegistered { entity } => {
                write!(
                    f,
                    "ApertureError::EntityNotRegistered: entity='{}'",
                    entity
                )
            }
            ApertureError::MissingConfiguration {
                component,
                required,
            } => {
                write!(
                    f,
                    "ApertureError::MissingConfiguration: component='{}' requires='{}'",
                    component, required
                )
            }
            ApertureError::InvalidConfiguration { component, message } => {
                write!(
                    f,
                    "ApertureError::InvalidConfiguration: component='{}' message='{}'",
                    component, message
                )
            }
        }
    }
}

impl std::error::Error for ApertureError {}

impl From<ApertureError> for sea_orm::DbErr {
    fn from(err: ApertureError) -> Self {
        sea_orm::DbErr::Custom(err.to_string())
    }
}

impl ApertureError {
    /// Create a malformed selection error
    pub fn malformed_selection(detail: impl Into<String>) -> Self {
        Self::MalformedSelection {
            detail: detail.into(),
        }
    }

    /// Create an unregistered entity error
    pub fn entity_not_registered(entity: impl Into<String>) -> Self {
        Self::EntityNotRegistered {
            entity: entity.into(),
        }
    }

    /// Create a missing configuration error
    pub fn missing_configuration(
        component: impl Into<String>,
        required: impl Into<String>,
    ) -> Self {
        Self::MissingConfiguration {
            component: component.into(),
            required: required.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedSelection { detail } => {
                format!("The 'fields' parameter could not be parsed: {}", detail)
            }
            Self::EntityNotRegistered { entity } => {
                format!(
                    "Entity '{}' is not registered. Please add it to the entity graph.",
                    entity
                )
            }
            Self::MissingConfiguration {
                component,
                required,
            } => {
                format!("Missing configuration for {}: {}", component, required)
            }
            Self::InvalidConfiguration { component, message } => {
                format!("Invalid configuration for {}: {}", component, message)
            }
        }
    }
}
