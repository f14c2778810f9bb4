use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::ops::Deref;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError;

/// Source of the owned copies the stack stores.
///
/// Freeing is the ordinary drop of the returned `Vec`.
pub trait ItemAllocator: Send + Sync {
    fn copy_in(&self, payload: &[u8]) -> Result<Vec<u8>, AllocError>;
}

/// Global heap with fallible reservation.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl ItemAllocator for HeapAllocator {
    fn copy_in(&self, payload: &[u8]) -> Result<Vec<u8>, AllocError> {
        let mut data = Vec::new();
        data.try_reserve_exact(payload.len())
            .map_err(|_| AllocError)?;
        data.extend_from_slice(payload);
        Ok(data)
    }
}

/// One stored payload. Never aliases the bytes it was created from.
#[derive(PartialEq, Eq)]
pub struct BufferItem {
    data: Vec<u8>,
}

impl BufferItem {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        BufferItem { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Deref for BufferItem {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl Debug for BufferItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "BufferItem({} bytes)", self.data.len())
    }
}
