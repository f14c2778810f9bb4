use crate::error::{Result, StackError};
use crate::item::{BufferItem, HeapAllocator, ItemAllocator};
use alloc::vec::Vec;
use core::mem::size_of;
use core::num::NonZeroUsize;
use log::{debug, trace};
use spin::Mutex;

/// Bounded stack of owned buffers shared between readers and writers.
///
/// The occupied slots are exactly the elements of `slots`, so the count is
/// `slots.len()` and there is no per-slot "empty" marker to keep in sync.
/// `slots` is reserved for `capacity` items up front and never grows past
/// it, so installing an item never reallocates the slot array.
///
/// One lock guards the whole collection: every successful push or pop is a
/// single count transition inside that critical section.
pub struct BufferStack<A: ItemAllocator = HeapAllocator> {
    capacity: NonZeroUsize,
    slots: Mutex<Vec<BufferItem>>,
    allocator: A,
}

impl BufferStack {
    pub fn new(capacity: NonZeroUsize) -> Result<Self> {
        BufferStack::with_allocator(capacity, HeapAllocator)
    }
}

impl<A: ItemAllocator> BufferStack<A> {
    pub fn with_allocator(capacity: NonZeroUsize, allocator: A) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity.get())
            .map_err(|_| StackError::OutOfMemory {
                requested: capacity.get().saturating_mul(size_of::<BufferItem>()),
            })?;
        Ok(BufferStack {
            capacity,
            slots: Mutex::new(slots),
            allocator,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.lock().len() >= self.capacity.get()
    }

    /// Stores an independent copy of `payload` on top of the stack.
    ///
    /// A full stack is refused before anything is allocated. If the copy
    /// cannot be allocated the stack is left exactly as it was.
    pub fn push(&self, payload: &[u8]) -> Result<()> {
        let mut slots = self.slots.lock();
        if slots.len() >= self.capacity.get() {
            trace!("push of {} bytes refused, stack is full", payload.len());
            return Err(StackError::Full);
        }
        let data = self
            .allocator
            .copy_in(payload)
            .map_err(|_| StackError::OutOfMemory {
                requested: payload.len(),
            })?;
        slots.push(BufferItem::new(data));
        trace!("pushed {} bytes, {} items stored", payload.len(), slots.len());
        Ok(())
    }

    /// Removes the most recently pushed item and hands it to the caller.
    pub fn pop(&self) -> Result<BufferItem> {
        let mut slots = self.slots.lock();
        match slots.pop() {
            Some(item) => {
                trace!("popped {} bytes, {} items stored", item.len(), slots.len());
                Ok(item)
            }
            None => {
                trace!("pop refused, stack is empty");
                Err(StackError::Empty)
            }
        }
    }

    /// Pops the top item into `dst` and returns its length.
    ///
    /// If the top item is longer than `dst` nothing is removed and
    /// `DestinationTooSmall` reports both sizes.
    pub fn pop_into(&self, dst: &mut [u8]) -> Result<usize> {
        let item = {
            let mut slots = self.slots.lock();
            let required = slots.last().ok_or(StackError::Empty)?.len();
            if required > dst.len() {
                return Err(StackError::DestinationTooSmall {
                    required,
                    available: dst.len(),
                });
            }
            slots.pop().ok_or(StackError::Empty)?
        };
        dst[..item.len()].copy_from_slice(&item);
        Ok(item.len())
    }

    /// Releases every stored item and returns how many there were.
    ///
    /// Takes `&mut self`, so no push or pop can be in flight.
    pub fn teardown(&mut self) -> usize {
        let slots = self.slots.get_mut();
        let released = slots.len();
        slots.clear();
        released
    }
}

impl<A: ItemAllocator> Drop for BufferStack<A> {
    fn drop(&mut self) {
        let released = self.teardown();
        if released > 0 {
            debug!("released {} items on drop", released);
        }
    }
}
