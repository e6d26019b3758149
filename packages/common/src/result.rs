use crate::error::CommonError;

/// Result alias for output handling
pub type CommonResult<T> = Result<T, CommonError>;
