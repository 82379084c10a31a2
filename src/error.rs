use thiserror::Error;

/// Everything that can go wrong inside the portfolio core.
///
/// Configuration variants are raised once at startup. The rest are raised
/// while the session runs and are logged rather than propagated into the
/// render loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
    #[error("no project with id `{id}` in the catalog")]
    NotFound { id: String },
    #[error("project id `{id}` appears more than once in the catalog")]
    DuplicateId { id: String },
    #[error("project `{id}` is missing required field `{field}`")]
    MissingField { id: String, field: &'static str },
    #[error("project `{id}` has invalid color token `{value}`")]
    InvalidColor { id: String, value: String },
    #[error("catalog contains no projects")]
    EmptyCatalog,
    #[error("frame timestamp {0} is not a finite number")]
    InvalidFrame(f64),
    #[error("contact form field `{field}` is invalid")]
    InvalidContact { field: &'static str },
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
