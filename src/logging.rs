//! Logger instances handed to components instead of a process-wide setup.
//!
//! Library code never calls `env_logger::init()`. Components take a [`SharedLogger`]
//! and write through it; the binary decides whether that is the global logger or a
//! dedicated file.

use chrono::Local;
use env_logger::{Builder, Target, WriteStyle};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::errors::Result;

pub type SharedLogger = Arc<dyn Log>;

/// Forwards every record to whatever `log::set_logger` installed.
pub struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        log::logger().log(record)
    }

    fn flush(&self) {
        log::logger().flush()
    }
}

pub fn global() -> SharedLogger {
    Arc::new(GlobalLogger)
}

/// Append-only text log: `timestamp - LEVEL - message`, one record per line.
pub fn file_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<SharedLogger> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    let logger = Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .build();

    Ok(Arc::new(logger))
}
