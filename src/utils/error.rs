use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Data unavailable at '{path}': {source}")]
    DataUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed inventory data in '{path}': {source}")]
    MalformedData {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    TerminalError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl InventoryError {
    /// 給對話框顯示的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            InventoryError::DataUnavailable { path, source } => {
                format!("Could not access the inventory file '{}'.\n{}", path, source)
            }
            InventoryError::MalformedData { path, source } => {
                format!("The inventory file '{}' is not valid.\n{}", path, source)
            }
            InventoryError::SerializationError(e) => {
                format!("The inventory could not be encoded.\n{}", e)
            }
            InventoryError::TerminalError(e) => format!("Terminal failure: {}", e),
            InventoryError::ConfigError { message } => format!("Configuration problem: {}", message),
            InventoryError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            InventoryError::DataUnavailable { .. } => {
                "Check that the file exists and that you have permission to read and write it"
            }
            InventoryError::MalformedData { .. } => {
                "The file must be a JSON object of objects mapping colors to non-negative integers"
            }
            InventoryError::SerializationError(_) => "Try saving again",
            InventoryError::TerminalError(_) => "Run the program in an interactive terminal",
            InventoryError::ConfigError { .. } | InventoryError::InvalidConfigValueError { .. } => {
                "Fix the settings file or command line arguments and start again"
            }
        }
    }

    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, InventoryError::DataUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
