pub mod analyze;
pub mod convert;
pub mod init;

pub use analyze::{analyze, AnalyzeArgs};
pub use convert::{convert, ConvertArgs};
pub use init::{init, InitArgs};
