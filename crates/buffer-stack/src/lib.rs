#![cfg_attr(not(test), no_std)]

//! Fixed-capacity LIFO store of owned byte buffers.
//!
//! Backing store for the stack pseudo-file: writers push copies of their
//! payloads, readers pop them back in last-in-first-out order.

extern crate alloc;

mod error;
mod item;
mod stack;

pub use error::{Result, StackError};
pub use item::{AllocError, BufferItem, HeapAllocator, ItemAllocator};
pub use stack::BufferStack;
