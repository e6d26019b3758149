use mockup_parser::NodeId;
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Component '{component}' points at {node}, which is not in the document")]
    MissingNode { component: String, node: NodeId },

    #[error("Unknown child component '{id}' of '{parent}'")]
    UnknownChild { parent: String, id: String },
}
