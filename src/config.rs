use alloc::borrow::ToOwned;
use alloc::string::String;
use core::num::NonZeroUsize;

pub const DEFAULT_PATH: &str = "/proc/demomodule";

pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(capacity) => capacity,
    None => panic!("capacity must be positive"),
};

/// What a read does when the caller's buffer is shorter than the top item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Fail with `BufferTooSmall` and keep the item on the stack.
    #[default]
    Reject,
    /// Pop the item and hand out as much of it as fits.
    Truncate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleConfig {
    pub path: String,
    pub capacity: NonZeroUsize,
    pub read_policy: ReadPolicy,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        ModuleConfig {
            path: DEFAULT_PATH.to_owned(),
            capacity: DEFAULT_CAPACITY,
            read_policy: ReadPolicy::default(),
        }
    }
}

impl ModuleConfig {
    pub fn with_path(mut self, path: &str) -> ModuleConfig {
        self.path = path.to_owned();
        self
    }

    pub fn with_capacity(mut self, capacity: NonZeroUsize) -> ModuleConfig {
        self.capacity = capacity;
        self
    }

    pub fn with_read_policy(mut self, policy: ReadPolicy) -> ModuleConfig {
        self.read_policy = policy;
        self
    }
}
