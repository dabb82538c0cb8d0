pub mod input;
pub mod store;

pub use crate::domain::model::{ColorCounts, Inventory};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
