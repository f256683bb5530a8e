use crate::frame::FrameDescriptor;

/// Identifies a function on the native stack by its address and its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    address: usize,
    name: &'static str,
}

impl Anchor {
    pub const fn new(address: usize, name: &'static str) -> Self {
        Self {
            address,
            name,
        }
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The address check needs the unwinder to know where functions begin, the name check needs
    /// symbols: either one is enough.
    pub fn matches(&self, frame: &FrameDescriptor) -> bool {
        if frame.symbol_address() == Some(self.address) {
            return true;
        }
        frame.function().map_or(false, |function| function == self.name)
    }
}

#[doc(hidden)]
pub fn type_name_of<T>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// Builds an [`Anchor`] for a function item.
///
/// The function must not be inlined (`#[inline(never)]`), otherwise it has no frame of its own.
#[macro_export]
macro_rules! anchor {
    ($function:path) => {
        $crate::Anchor::new($function as *const () as usize, $crate::anchor::type_name_of(&$function))
    };
}
