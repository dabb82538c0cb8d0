pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;

pub use adapters::storage::LocalStorage;
pub use config::{CliConfig, Settings};
pub use core::input::{Control, ModifierState, StepConfig};
pub use core::store::{InventoryStore, DEFAULT_DATA_FILE};
pub use domain::model::{ColorCounts, Inventory};
pub use ui::app::{App, ExitReason};
pub use utils::error::{InventoryError, Result};
