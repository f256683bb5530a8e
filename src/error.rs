use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write the stack report: {0}")]
    Io(#[from] io::Error),
    #[error("the stack inspector returned no frames")]
    EmptySnapshot,
    #[error("no frame found for `{name}` (inlined or missing unwind information?)")]
    FrameNotFound {
        name: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
