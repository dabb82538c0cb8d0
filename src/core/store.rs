use crate::domain::model::Inventory;
use crate::domain::ports::Storage;
use crate::utils::error::{InventoryError, Result};

/// 預設資料檔，載入與儲存都使用同一路徑
pub const DEFAULT_DATA_FILE: &str = "template.json";

/// 綁定單一路徑的庫存存取器
pub struct InventoryStore<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> InventoryStore<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn load(&self) -> Result<Inventory> {
        tracing::debug!("Reading inventory from: {}", self.path);
        let data = self.storage.read_file(&self.path)?;

        let inventory =
            Inventory::from_json_slice(&data).map_err(|source| InventoryError::MalformedData {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(
            "📦 Loaded {} length rows from {}",
            inventory.len(),
            self.path
        );
        Ok(inventory)
    }

    pub fn save(&self, inventory: &Inventory) -> Result<()> {
        let data = inventory.to_json_pretty()?;
        self.storage.write_file(&self.path, &data)?;
        tracing::info!("💾 Saved inventory to {}", self.path);
        Ok(())
    }
}
