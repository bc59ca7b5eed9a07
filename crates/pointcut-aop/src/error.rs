use pointcut_types::TypeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Type(#[from] TypeError),
}
