use facematch_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Rejected before any request was made.
    #[error("{0}")]
    Validation(String),
    /// The server could not be reached or answered with something unreadable.
    #[error("{0}")]
    Transport(String),
    /// The server answered and reported a failure.
    #[error("{message}")]
    Server { status: Option<u16>, message: String },
    #[error("io error: {0}")]
    Io(String),
}

impl ApplicationError {
    /// Text shown in a form's result container.
    pub fn inline_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Server { message, .. } => message.clone(),
            Self::Domain(_) | Self::Transport(_) | Self::Io(_) => format!("Error: {self}"),
        }
    }
}
