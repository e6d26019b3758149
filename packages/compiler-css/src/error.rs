use mockup_parser::ParseError;
use thiserror::Error;

pub type CssResult<T> = Result<T, CssError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CssError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Unknown CSS strategy '{name}' (expected utility, modules or external)")]
    UnknownStrategy { name: String },
}

impl CssError {
    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        CssError::UnknownStrategy { name: name.into() }
    }
}
