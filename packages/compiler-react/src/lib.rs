//! # Mockup React Compiler
//!
//! Emits JSX/TSX component modules from a split mockup. HTML attributes go
//! through the [`AttributeTransformer`] on their way out.

pub mod attributes;
mod compiler;
mod context;
mod definitions;
mod error;

pub use attributes::{
    style_to_object, AttributeRule, AttributeTransformer, TransformType, TransformedAttribute,
    TransformedValue,
};
pub use compiler::{
    compile_app, compile_component, compile_index, compile_node, compile_to_jsx, escape_jsx_text,
    index_export,
};
pub use context::{CompileOptions, CompilerContext, ComponentReference, StylesheetImport};
pub use definitions::{compile_props_interface, props_interface_name};
pub use error::{CompileError, CompileResult};
