use mockup_compiler_react::CompileError;
use mockup_parser::ParseError;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Code generation failed: {0}")]
    Compile(#[from] CompileError),
}
