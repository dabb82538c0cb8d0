use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::utils::error::{InventoryError, Result};

/// 終端機由介面佔用，日誌只寫入檔案；沒有指定檔案時直接丟棄
pub fn init_file_logger(verbose: bool, level: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    let default_directive = match (level, verbose) {
        (Some(level), _) => format!("cable_inventory={}", level),
        (None, true) => "cable_inventory=debug,info".to_string(),
        (None, false) => "cable_inventory=info".to_string(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| InventoryError::ConfigError {
                    message: format!("cannot open log file '{}': {}", path.display(), e),
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();

    Ok(())
}
