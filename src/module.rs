//! The stack pseudo-file and its load/unload hooks.

use crate::config::{ModuleConfig, ReadPolicy};
use crate::proc::{ProcError, ProcFile, ProcManager};
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt::{Debug, Display, Formatter};
use procstack_buffer_stack::{BufferStack, StackError};

/// Converts a stack result into a byte count for the host.
///
/// A full or empty stack transfers nothing; every other refusal is an error.
fn transfer(result: Result<usize, StackError>) -> Result<usize, ProcError> {
    match result {
        Ok(n) => Ok(n),
        Err(StackError::Full) | Err(StackError::Empty) => Ok(0),
        Err(StackError::OutOfMemory { .. }) => Err(ProcError::OutOfMemory),
        Err(StackError::DestinationTooSmall {
            required,
            available,
        }) => Err(ProcError::BufferTooSmall {
            required,
            available,
        }),
    }
}

/// Maps host reads and writes onto pops and pushes of a `BufferStack`.
pub struct StackFile {
    stack: BufferStack,
    policy: ReadPolicy,
}

impl StackFile {
    pub fn new(stack: BufferStack, policy: ReadPolicy) -> Self {
        StackFile { stack, policy }
    }

    pub fn stack(&self) -> &BufferStack {
        &self.stack
    }

    /// Pops the top item even if it does not fit. The prefix that fits is
    /// in `buf` and the loss is reported as `Truncated`.
    fn read_truncated(&self, buf: &mut [u8]) -> Result<usize, ProcError> {
        let item = match self.stack.pop() {
            Ok(item) => item,
            Err(e) => return transfer(Err(e)),
        };
        let copied = item.len().min(buf.len());
        buf[..copied].copy_from_slice(&item[..copied]);
        if copied < item.len() {
            let discarded = item.len() - copied;
            warn!("read truncated: {} of {} bytes discarded", discarded, item.len());
            return Err(ProcError::Truncated { copied, discarded });
        }
        Ok(copied)
    }
}

impl ProcFile for StackFile {
    fn read(&self, buf: &mut [u8]) -> Result<usize, ProcError> {
        match self.policy {
            ReadPolicy::Reject => transfer(self.stack.pop_into(buf)),
            ReadPolicy::Truncate => self.read_truncated(buf),
        }
    }

    fn write(&self, buf: &[u8]) -> Result<usize, ProcError> {
        let result = transfer(self.stack.push(buf).map(|()| buf.len()));
        if let Err(e) = &result {
            error!("Unable to store {} bytes: {:?}", buf.len(), e);
        }
        result
    }
}

pub enum ModuleError {
    Stack(StackError),
    Register(ProcError),
}

impl Debug for ModuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ModuleError::Stack(e) => write!(f, "Unable to create stack: {}", e),
            ModuleError::Register(e) => write!(f, "Unable to register proc file: {:?}", e),
        }
    }
}

impl Display for ModuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl core::error::Error for ModuleError {}

/// A loaded module: the stack file registered at its configured path.
///
/// Unloading removes the file first and then releases whatever the stack
/// still holds. Dropping the handle unloads it too.
pub struct StackModule {
    path: String,
    file: Option<Arc<StackFile>>,
}

impl StackModule {
    pub fn init(config: ModuleConfig) -> Result<StackModule, ModuleError> {
        info!("Hello, world!");
        let stack = BufferStack::new(config.capacity).map_err(ModuleError::Stack)?;
        let file = Arc::new(StackFile::new(stack, config.read_policy));
        if let Err(e) = ProcManager::register(&config.path, file.clone()) {
            error!("Unable to register \"{}\" proc file: {:?}", config.path, e);
            return Err(ModuleError::Register(e));
        }
        info!(
            "{} ready, capacity {} items",
            config.path,
            config.capacity.get()
        );
        Ok(StackModule {
            path: config.path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.file.as_ref().map_or(0, |file| file.stack().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unloads the module and returns how many stored items were released.
    pub fn exit(mut self) -> usize {
        self.unload()
    }

    fn unload(&mut self) -> usize {
        let Some(file) = self.file.take() else {
            return 0;
        };
        if let Err(e) = ProcManager::remove(&self.path) {
            warn!("{} was already gone on unload: {:?}", self.path, e);
        }
        let released = match Arc::try_unwrap(file) {
            Ok(mut file) => file.stack.teardown(),
            Err(_) => {
                warn!(
                    "{} is still referenced, items are released with the last reference",
                    self.path
                );
                0
            }
        };
        info!("Goodbye, world!");
        released
    }
}

impl Drop for StackModule {
    fn drop(&mut self) {
        self.unload();
    }
}
