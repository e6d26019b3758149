use mockup_parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type SplitterResult<T> = Result<T, SplitError>;
