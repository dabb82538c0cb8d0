use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// 顏色 → 數量，保留檔案中的順序
pub type ColorCounts = IndexMap<String, u64>;

/// 長度 → 各顏色數量。
///
/// 鍵集合在載入時就固定，執行期間只會改數量，不會新增或刪除鍵。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    lengths: IndexMap<String, ColorCounts>,
}

impl Inventory {
    pub fn from_json_slice(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    pub fn from_json_str(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    /// 以四格縮排輸出 JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(buf)
    }

    /// 調整數量並回傳新值；結果不會小於 0。
    ///
    /// 找不到 `(length, color)` 時回傳 `None`，庫存保持不變。
    pub fn adjust(&mut self, length: &str, color: &str, delta: i64) -> Option<u64> {
        let count = self.lengths.get_mut(length)?.get_mut(color)?;
        *count = count.saturating_add_signed(delta);
        Some(*count)
    }

    pub fn total(&self, length: &str) -> Option<u64> {
        self.lengths
            .get(length)
            .map(|colors| colors.values().fold(0u64, |acc, count| acc.saturating_add(*count)))
    }

    pub fn count(&self, length: &str, color: &str) -> Option<u64> {
        self.lengths.get(length)?.get(color).copied()
    }

    pub fn lengths(&self) -> impl Iterator<Item = &str> {
        self.lengths.keys().map(String::as_str)
    }

    pub fn colors(&self, length: &str) -> Option<impl Iterator<Item = &str>> {
        self.lengths
            .get(length)
            .map(|colors| colors.keys().map(String::as_str))
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &ColorCounts)> {
        self.lengths.iter().map(|(length, colors)| (length.as_str(), colors))
    }

    /// 以格子座標取得 `(length, color)`
    pub fn entry_at(&self, row: usize, col: usize) -> Option<(&str, &str)> {
        let (length, colors) = self.lengths.get_index(row)?;
        let (color, _) = colors.get_index(col)?;
        Some((length.as_str(), color.as_str()))
    }

    pub fn colors_in_row(&self, row: usize) -> usize {
        self.lengths
            .get_index(row)
            .map(|(_, colors)| colors.len())
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}
