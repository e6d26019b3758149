//! # Mockup CSS Compiler
//!
//! Moves inline `style` attributes of a parsed mockup into a styling
//! artifact. Three strategies share the [`CssStrategy`] trait:
//!
//! - [`UtilityStrategy`]: utility-class tokens, no stylesheet
//! - [`ModuleStrategy`]: scoped CSS module with content-hashed class names
//! - [`ExternalStrategy`]: plain stylesheet, optionally linked from the HTML
//!
//! ```rust,ignore
//! use mockup_compiler_css::{create_strategy, CssOptions, CssStrategyKind};
//!
//! let mut strategy = create_strategy(CssStrategyKind::Modules, CssOptions::default());
//! let result = strategy.convert(r#"<div style="color: red">Hi</div>"#);
//! println!("{}", result.css);
//! ```

pub mod error;
pub mod external;
pub mod modules;
pub mod options;
pub mod strategy;
pub mod stylesheet;
pub mod utility;

pub use error::{CssError, CssResult};
pub use external::ExternalStrategy;
pub use modules::ModuleStrategy;
pub use options::{CssOptions, CssStrategyKind};
pub use strategy::{
    create_strategy, CssConversionResult, CssStats, CssStrategy, DocumentConversion,
};
pub use stylesheet::{CssRule, Declarations, Stylesheet};
pub use utility::{utility_classes, UtilityStrategy};
