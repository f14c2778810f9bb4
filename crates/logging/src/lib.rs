#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::boxed::Box;
use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

/// `log` sink writing one line per record into any `fmt::Write` target.
pub struct Logger<T> {
    level: LevelFilter,
    writer: Mutex<T>,
}

impl<T: Write + Send + 'static> Logger<T> {
    pub fn new(target: T) -> Logger<T> {
        Logger {
            level: LevelFilter::Info,
            writer: Mutex::new(target),
        }
    }

    pub fn set_max_level(mut self, level: LevelFilter) -> Logger<T> {
        self.level = level;
        self
    }

    /// Installs this logger as the process-wide `log` backend.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_logger(Box::leak(Box::new(self)))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl<T: Write + Send> Log for Logger<T> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = if !record.target().is_empty() {
            record.target()
        } else {
            record.module_path().unwrap_or_default()
        };

        let mut writer = self.writer.lock();
        // a broken sink must not take the caller down with it
        let _ = writeln!(writer, "[{}] {} {}", record.level(), target, record.args());
    }

    fn flush(&self) {}
}
