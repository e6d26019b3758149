use thiserror::Error;

/// Error type shared by everything that touches generated output
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refusing to write outside the output directory: {path}")]
    InvalidPath { path: String },
}

impl CommonError {
    pub fn invalid_path(path: impl Into<String>) -> Self {
        CommonError::InvalidPath { path: path.into() }
    }
}
