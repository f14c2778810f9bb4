use crate::proc::tree::{ElementInfo, ProcTree, ProcTreeError};
use crate::proc::{ProcError, ProcFile};
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::{Lazy, Mutex};

static INNER: Lazy<Mutex<ProcTree>> = Lazy::new(|| Mutex::new(ProcTree::new()));

/// Global registry of pseudo-files.
///
/// Reads and writes run with the registry locked, so once `remove` returns
/// no call into the removed file is still in progress.
pub struct ProcManager {}

impl ProcManager {
    pub fn register(path: &str, file: Arc<dyn ProcFile>) -> Result<(), ProcError> {
        let mut inner = INNER.lock();
        inner.put(path, file).map_err(|e| match e {
            ProcTreeError::AlreadyOccupied => ProcError::AlreadyOccupied,
            ProcTreeError::InvalidPath => ProcError::InvalidPath,
        })?;
        debug!("registered {}", path);
        Ok(())
    }

    pub fn remove(path: &str) -> Result<Arc<dyn ProcFile>, ProcError> {
        let mut inner = INNER.lock();
        let file = inner.remove(path).ok_or(ProcError::NotFound)?;
        debug!("removed {}", path);
        Ok(file)
    }

    pub fn read(path: &str, buf: &mut [u8]) -> Result<usize, ProcError> {
        let inner = INNER.lock();
        match inner.get(path) {
            Some(file) => file.read(buf),
            None => Err(ProcError::NotFound),
        }
    }

    pub fn write(path: &str, buf: &[u8]) -> Result<usize, ProcError> {
        let inner = INNER.lock();
        match inner.get(path) {
            Some(file) => file.write(buf),
            None => Err(ProcError::NotFound),
        }
    }

    pub fn exists(path: &str) -> bool {
        INNER.lock().get(path).is_some()
    }

    pub fn list(path: &str) -> Vec<ElementInfo> {
        INNER.lock().list(path)
    }
}
