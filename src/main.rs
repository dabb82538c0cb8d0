use std::path::Path;

use cable_inventory::ui::terminal;
use cable_inventory::utils::{logger, validation::Validate};
use cable_inventory::{App, CliConfig, ExitReason, InventoryStore, LocalStorage, Settings};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證設定
    let settings = match Settings::resolve(&cli).and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    // 初始化日誌
    logger::init_file_logger(
        settings.verbose,
        settings.log_level.as_deref(),
        settings.log_file.as_deref().map(Path::new),
    )?;

    tracing::info!("🚀 Starting cable-inventory");
    tracing::debug!("Settings: {:?}", settings);

    let store = InventoryStore::new(LocalStorage::current_dir(), settings.data_file.clone());
    let inventory = match store.load() {
        Ok(inventory) => inventory,
        Err(e) => {
            tracing::error!("❌ Failed to load inventory: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            if let Err(screen_err) = terminal::show_fatal_error(&e) {
                tracing::warn!("Could not show error dialog: {}", screen_err);
            }
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let mut app = App::new(inventory, store, settings.steps);
    match terminal::run(&mut app)? {
        ExitReason::Saved => {
            tracing::info!("✅ Inventory saved to {}", settings.data_file);
            println!("✅ Inventory saved to {}", settings.data_file);
        }
        ExitReason::Discarded => {
            tracing::info!("Changes discarded");
            println!("Changes discarded.");
        }
    }

    Ok(())
}
