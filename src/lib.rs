//! Prints the call stack of the running program, one block per frame:
//!
//! ```text
//! frame #0:
//!   frame_report::report::report_stack at src/report.rs:127 [0x55d1c3a0b2f4] | let snapshot = StackReporter::default().snapshot(&crate::anchor!(report_stack))?;
//!
//! frame #1:
//!   frame_report::main at src/main.rs:15 [0x55d1c3a0a8e1] | if let Err(err) = report_stack() {
//!
//! ```

#[doc(hidden)]
pub mod anchor;
mod error;
mod frame;
mod inspector;
mod report;
mod source;

pub use anchor::Anchor;
pub use error::{ReportError, Result};
pub use frame::{FrameDescriptor, FrameSnapshot};
pub use inspector::{BacktraceInspector, StackInspector};
pub use report::{entry_point, report_stack, set_entry_point, write_snapshot, StackReporter};
