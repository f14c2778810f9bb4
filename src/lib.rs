#![cfg_attr(not(test), no_std)]

//! A LIFO stack of byte buffers exposed as a pseudo-file.
//!
//! Every write pushes a copy of the written bytes, every read pops the most
//! recent one. [`StackModule::init`] registers the file with [`ProcManager`]
//! and [`StackModule::exit`] takes it down again.

extern crate alloc;
#[macro_use]
extern crate log;

mod config;
mod module;
pub mod proc;

pub use config::{ModuleConfig, ReadPolicy, DEFAULT_CAPACITY, DEFAULT_PATH};
pub use module::{ModuleError, StackFile, StackModule};
pub use proc::{ElementInfo, ProcError, ProcFile, ProcManager};
pub use procstack_buffer_stack as buffer;
