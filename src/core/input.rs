use crossterm::event::KeyModifiers;

/// 格子裡的兩種按鈕
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Increment,
    Decrement,
}

/// 是否按住了放大步進的修飾鍵
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifierState {
    #[default]
    Plain,
    Held,
}

impl ModifierState {
    /// 鍵盤：`+` 本身常需 Shift，所以只認 Alt / Ctrl
    pub fn from_key_modifiers(modifiers: KeyModifiers) -> Self {
        if modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
            ModifierState::Held
        } else {
            ModifierState::Plain
        }
    }

    pub fn from_mouse_modifiers(modifiers: KeyModifiers) -> Self {
        if modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL) {
            ModifierState::Held
        } else {
            ModifierState::Plain
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepConfig {
    pub small_step: u64,
    pub large_step: u64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            small_step: 1,
            large_step: 10,
        }
    }
}

impl StepConfig {
    /// (按鈕, 修飾鍵) → 有號增量
    pub fn delta(&self, control: Control, modifiers: ModifierState) -> i64 {
        let magnitude = match modifiers {
            ModifierState::Plain => self.small_step,
            ModifierState::Held => self.large_step,
        };
        let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);
        match control {
            Control::Increment => magnitude,
            Control::Decrement => -magnitude,
        }
    }
}
