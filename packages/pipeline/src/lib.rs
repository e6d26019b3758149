//! # Mockup Pipeline
//!
//! Parse → split → move styles out → generate components. One call turns an
//! HTML mockup into a set of [`GeneratedFile`]s.
//!
//! ```rust,ignore
//! use mockup_pipeline::{ConvertOptions, Pipeline};
//!
//! let output = Pipeline::new().convert(html, &ConvertOptions::default())?;
//! for file in &output.files {
//!     println!("{}", file.path);
//! }
//! ```

pub mod error;
pub mod options;
pub mod pipeline;

pub use error::{PipelineError, PipelineResult};
pub use mockup_common::{FileKind, GeneratedFile};
pub use options::ConvertOptions;
pub use pipeline::{convert, ConversionOutput, Pipeline};
