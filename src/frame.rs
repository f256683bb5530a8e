use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// One active function invocation, as reported by a [`StackInspector`](crate::StackInspector).
///
/// Only `ip` is always known: everything else depends on the unwinder and on the debug
/// information available in the binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameDescriptor {
    pub(crate) ip: usize,
    pub(crate) symbol_address: Option<usize>,
    pub(crate) function: Option<String>,
    pub(crate) filename: Option<PathBuf>,
    pub(crate) lineno: Option<u32>,
    pub(crate) code_context: Option<String>,
}

impl FrameDescriptor {
    pub fn new(ip: usize) -> Self {
        Self {
            ip,
            symbol_address: None,
            function: None,
            filename: None,
            lineno: None,
            code_context: None,
        }
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn symbol_address(&self) -> Option<usize> {
        self.symbol_address
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn filename(&self) -> Option<&PathBuf> {
        self.filename.as_ref()
    }

    pub fn lineno(&self) -> Option<u32> {
        self.lineno
    }

    pub fn code_context(&self) -> Option<&str> {
        self.code_context.as_deref()
    }
}

impl Display for FrameDescriptor {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{} at ", self.function().unwrap_or("<unknown>"))?;
        match (&self.filename, self.lineno) {
            (Some(filename), Some(lineno)) => write!(formatter, "{}:{}", filename.display(), lineno)?,
            (Some(filename), None) => write!(formatter, "{}", filename.display())?,
            (None, _) => write!(formatter, "<unknown location>")?,
        }
        write!(formatter, " [{:#x}]", self.ip)?;
        if let Some(code) = &self.code_context {
            write!(formatter, " | {}", code)?;
        }
        Ok(())
    }
}

/// Frames active at one moment, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSnapshot {
    frames: Vec<FrameDescriptor>,
}

impl FrameSnapshot {
    pub fn frames(&self) -> &[FrameDescriptor] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameDescriptor> {
        self.frames.iter()
    }
}

impl From<Vec<FrameDescriptor>> for FrameSnapshot {
    fn from(frames: Vec<FrameDescriptor>) -> Self {
        Self {
            frames,
        }
    }
}

impl<'a> IntoIterator for &'a FrameSnapshot {
    type Item = &'a FrameDescriptor;
    type IntoIter = std::slice::Iter<'a, FrameDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::FrameDescriptor;

    fn frame(function: Option<&str>, filename: Option<&str>, lineno: Option<u32>, code: Option<&str>) -> FrameDescriptor {
        let mut frame = FrameDescriptor::new(0x55aa);
        frame.function = function.map(ToString::to_string);
        frame.filename = filename.map(Into::into);
        frame.lineno = lineno;
        frame.code_context = code.map(ToString::to_string);
        frame
    }

    #[rstest]
    #[case::full(
        frame(Some("demo::main"), Some("src/main.rs"), Some(12), Some("report_stack();")),
        "demo::main at src/main.rs:12 [0x55aa] | report_stack();"
    )]
    #[case::no_context(
        frame(Some("demo::main"), Some("src/main.rs"), Some(12), None),
        "demo::main at src/main.rs:12 [0x55aa]"
    )]
    #[case::no_line(
        frame(Some("demo::main"), Some("src/main.rs"), None, None),
        "demo::main at src/main.rs [0x55aa]"
    )]
    #[case::stripped(frame(None, None, None, None), "<unknown> at <unknown location> [0x55aa]")]
    fn renders_descriptor(#[case] frame: FrameDescriptor, #[case] expected: &str) {
        assert_eq!(frame.to_string(), expected);
    }
}
