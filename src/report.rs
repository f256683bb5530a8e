use std::io::{self, Write};

use log::{debug, warn};
use once_cell::sync::OnceCell;

use crate::anchor::Anchor;
use crate::error::{ReportError, Result};
use crate::frame::{FrameDescriptor, FrameSnapshot};
use crate::inspector::{BacktraceInspector, StackInspector};

/// Marker frame the Rust runtime puts below `main` and below every spawned thread's closure.
const SHORT_BACKTRACE_MARKER: &str = "__rust_begin_short_backtrace";

/// Crates whose frames between the entry function and the marker are call shims, not user code.
const RUNTIME_CRATES: [&str; 3] = ["core::", "std::", "alloc::"];

static ENTRY_POINT: OnceCell<Anchor> = OnceCell::new();

/// Registers the process entry point used by [`report_stack`].
///
/// Returns false if an entry point was already registered; the first one is kept.
pub fn set_entry_point(entry: Anchor) -> bool {
    ENTRY_POINT.set(entry).is_ok()
}

pub fn entry_point() -> Option<Anchor> {
    ENTRY_POINT.get().copied()
}

pub struct StackReporter<I = BacktraceInspector> {
    inspector: I,
    entry: Option<Anchor>,
}

impl<I: StackInspector> StackReporter<I> {
    pub fn new(inspector: I) -> Self {
        Self {
            inspector,
            entry: None,
        }
    }

    /// Ends every snapshot with the frame of `entry`.
    pub fn with_entry(mut self, entry: Anchor) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Captures the frames from `innermost` outward to the entry point.
    pub fn snapshot(&self, innermost: &Anchor) -> Result<FrameSnapshot> {
        let mut frames = self.inspector.current_frames();
        if frames.is_empty() {
            return Err(ReportError::EmptySnapshot);
        }

        let start = frames.iter()
            .position(|frame| innermost.matches(frame))
            .ok_or(ReportError::FrameNotFound { name: innermost.name() })?;
        frames.drain(..start);

        let end = self.outermost(&frames);
        frames.truncate(end);
        debug!("Snapshot of {} frames from {}", frames.len(), innermost.name());
        Ok(frames.into())
    }

    /// Writes the snapshot starting at `innermost` to `output`.
    pub fn report<W: Write>(&self, innermost: &Anchor, output: W) -> Result<()> {
        let snapshot = self.snapshot(innermost)?;
        write_snapshot(&snapshot, output)?;
        Ok(())
    }

    // Length of the snapshot, given frames that start at the innermost anchor.
    fn outermost(&self, frames: &[FrameDescriptor]) -> usize {
        if let Some(entry) = &self.entry {
            match frames.iter().position(|frame| entry.matches(frame)) {
                Some(index) => return index + 1,
                None => warn!("Entry point {} not on the stack, reporting up to the runtime", entry.name()),
            }
        }

        let marker = frames.iter()
            .position(|frame| frame.function().map_or(false, |function| function.ends_with(SHORT_BACKTRACE_MARKER)));
        let mut end = match marker {
            Some(index) => index,
            None => return frames.len(),
        };
        // Debug builds keep shims such as `FnOnce::call_once` above the marker. The innermost
        // frame always stays.
        while end > 1 && is_runtime_frame(&frames[end - 1]) {
            end -= 1;
        }
        end
    }
}

fn is_runtime_frame(frame: &FrameDescriptor) -> bool {
    frame.function().map_or(false, |function| {
        let function = function.trim_start_matches('<');
        RUNTIME_CRATES.iter().any(|krate| function.starts_with(krate))
    })
}

impl Default for StackReporter {
    fn default() -> Self {
        let reporter = Self::new(BacktraceInspector::new());
        match entry_point() {
            Some(entry) => reporter.with_entry(entry),
            None => reporter,
        }
    }
}

/// Renders each frame as a `frame #<index>:` header, the indented descriptor and a blank line.
pub fn write_snapshot<W: Write>(snapshot: &FrameSnapshot, mut output: W) -> io::Result<()> {
    for (index, frame) in snapshot.iter().enumerate() {
        write!(output, "frame #{}:\n  {}\n\n", index, frame)?;
    }
    output.flush()
}

/// Prints the stack of the calling thread to stdout, from this function out to the entry point
/// registered with [`set_entry_point`].
#[inline(never)]
pub fn report_stack() -> Result<()> {
    let snapshot = StackReporter::default().snapshot(&crate::anchor!(report_stack))?;
    write_snapshot(&snapshot, io::stdout().lock())?;
    Ok(())
}
