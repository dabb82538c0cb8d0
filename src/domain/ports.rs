use crate::utils::error::Result;

/// 讀寫原始位元組的儲存後端
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
