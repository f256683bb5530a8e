use backtrace::{Backtrace, BacktraceFrame};
use log::debug;

use crate::frame::FrameDescriptor;
use crate::source;

/// Enumerates the frames active in the calling thread.
pub trait StackInspector {
    /// Frames from the caller of `current_frames` outward, innermost first.
    fn current_frames(&self) -> Vec<FrameDescriptor>;
}

/// Inspector backed by the native unwinder.
#[derive(Clone, Debug)]
pub struct BacktraceInspector {
    code_context: bool,
}

impl BacktraceInspector {
    pub fn new() -> Self {
        Self {
            code_context: true,
        }
    }

    pub fn with_code_context(mut self, code_context: bool) -> Self {
        self.code_context = code_context;
        self
    }

    fn describe(&self, frame: &BacktraceFrame) -> FrameDescriptor {
        let mut descriptor = FrameDescriptor::new(frame.ip() as usize);
        let symbol_address = frame.symbol_address() as usize;
        if symbol_address != 0 {
            descriptor.symbol_address = Some(symbol_address);
        }

        // With inlining, the last symbol is the function that actually owns the frame.
        if let Some(symbol) = frame.symbols().last() {
            descriptor.function = symbol.name().map(|name| format!("{:#}", name));
            descriptor.filename = symbol.filename().map(|filename| filename.to_path_buf());
            descriptor.lineno = symbol.lineno();
        }

        if self.code_context {
            if let (Some(filename), Some(lineno)) = (&descriptor.filename, descriptor.lineno) {
                descriptor.code_context = source::code_context(filename, lineno);
            }
        }
        descriptor
    }
}

impl Default for BacktraceInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl StackInspector for BacktraceInspector {
    #[inline(never)]
    fn current_frames(&self) -> Vec<FrameDescriptor> {
        let mut backtrace = capture();
        backtrace.resolve();

        let capture_address = capture as *const () as usize;
        let method_address = <Self as StackInspector>::current_frames as *const () as usize;
        let frames = backtrace.frames();
        // Drop the unwinder's frames, `capture` and this method.
        let mut start = frames.iter()
            .position(|frame| frame.symbol_address() as usize == capture_address)
            .map(|index| index + 1)
            .unwrap_or(0);
        if frames.get(start).map_or(false, |frame| frame.symbol_address() as usize == method_address) {
            start += 1;
        }
        debug!("Captured {} native frames, skipping {}", frames.len(), start);

        frames.iter()
            .skip(start)
            .map(|frame| self.describe(frame))
            .collect()
    }
}

#[inline(never)]
fn capture() -> Backtrace {
    Backtrace::new_unresolved()
}
