use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("circular dependency detected: {0}")]
    Circular(String),

    #[error("No suitable candidate for package {0} found")]
    NoCandidate(String),

    #[error("Package {name} is required at version {required} but installed at version {installed}")]
    InstalledMismatch {
        name: String,
        required: String,
        installed: String,
    },

    #[error("conflicting requirement for {name}: already placed at {placed}, also required {required}")]
    Conflict {
        name: String,
        placed: String,
        required: String,
    },

    #[error("failed to parse '{0}': {1}")]
    Parse(String, String),
}
