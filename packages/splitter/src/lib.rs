//! # Mockup Component Splitter
//!
//! Decides which elements of a parsed mockup become standalone components,
//! names them and arranges them into a component tree.
//!
//! ```rust,ignore
//! let mut splitter = ComponentSplitter::new(SplitOptions::default());
//! let result = splitter.split("<header><h1>Title</h1></header>");
//! assert_eq!(result.components[0].name, "Header");
//! ```

pub mod component;
pub mod error;
pub mod instances;
pub mod naming;
pub mod options;
pub mod role;
pub mod splitter;
pub mod tree;

pub use component::{
    BemType, ComponentDefinition, ComponentMetadata, ComponentRole, ComponentType, InstanceOf,
    PropBinding, PropSource, SuggestedProp,
};
pub use error::{SplitError, SplitterResult};
pub use naming::{component_identifier, NameContext, NameGenerator, NamingConvention, NamingOptions};
pub use options::SplitOptions;
pub use splitter::{ComponentSplitter, SplitMetadata, SplitResult};
pub use tree::{ComponentEdge, ComponentTree, ComponentTreeNode};
