pub mod error;
pub mod filesystem;
pub mod generated;
pub mod result;

pub use error::*;
pub use filesystem::*;
pub use generated::*;
pub use result::*;
