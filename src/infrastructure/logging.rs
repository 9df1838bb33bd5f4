//! Logging setup
//!
//! Console output always; optionally a daily rolling file under the
//! configured log directory. Events are grouped by target:
//! - hierarchy - structure dumps and build diagnostics
//! - propagation - per-update walk details (trace level)
//! - io - source/sink activity
//! - engine - run lifecycle and summaries

use super::config::LoggingConfig;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

/// File name prefix for the rolling log
const LOG_FILE_PREFIX: &str = "portfolio-sim.log";

/// Initialize logging
///
/// Returns the WorkerGuards of any non-blocking writers; keep them alive for
/// the duration of the program or buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> std::io::Result<Vec<WorkerGuard>> {
    let mut guards = Vec::new();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    let file_layer = match &config.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true)
                    .json(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!(
        target: "engine",
        log_dir = ?config.log_dir,
        "Logging system initialized"
    );

    Ok(guards)
}

/// Log macro helpers for specific targets
#[macro_export]
macro_rules! log_hierarchy {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "hierarchy", $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_io {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "io", $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_engine {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "engine", $level, $($arg)+)
    };
}
