use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(
        "no viable outfit: {considered} garment(s) considered, {excluded} excluded by hard filters"
    )]
    NoViableOutfit { considered: usize, excluded: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(String),
    #[error("input failure: {0}")]
    Input(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String },
    #[error("no outfit: {message}")]
    NoOutfit { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "The request could not be processed. Check inputs and try again.",
            Self::NoOutfit { .. } => {
                "No outfit could be assembled. Add more garments or relax the constraints."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    /// Stable machine-readable class for structured output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad_request",
            Self::NoOutfit { .. } => "no_viable_outfit",
            Self::Internal { .. } => "internal",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message } | Self::NoOutfit { message } | Self::Internal { message } => message,
        }
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let message = value.to_string();
        match value {
            ApplicationError::Domain(DomainError::NoViableOutfit { .. }) => Self::NoOutfit { message },
            ApplicationError::Domain(DomainError::InvalidInput(_)) | ApplicationError::Input(_) => {
                Self::BadRequest { message }
            }
            ApplicationError::Domain(DomainError::InvariantViolation(_))
            | ApplicationError::Configuration(_) => Self::Internal { message },
        }
    }
}
