// Resume PDF rendering.
// The LaTeX toolchain runs as a child process; nothing here parses its output
// beyond keeping the log tail for error reports.

pub mod latex;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use latex::LatexCompiler;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("compilation timed out after {0}s")]
    Timeout(u64),

    #[error("compiler exited with {status}: {log_tail}")]
    Failed { status: String, log_tail: String },

    #[error("compiler finished but produced no PDF")]
    MissingOutput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns the resume source into a PDF document.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self) -> Result<Bytes, CompileError>;
}
