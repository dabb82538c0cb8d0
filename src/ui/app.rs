use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::core::input::{Control, ModifierState, StepConfig};
use crate::core::store::InventoryStore;
use crate::domain::model::Inventory;
use crate::domain::ports::Storage;
use crate::ui::dialog::{Dialog, DialogAnswer, DialogButton};

pub const TITLE: &str = "RJ45 Inventory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Saved,
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Adjust {
        row: usize,
        col: usize,
        control: Control,
        modifiers: ModifierState,
    },
    AdjustSelected {
        control: Control,
        modifiers: ModifierState,
    },
    Move(Direction),
    SaveAndQuit,
    QuitWithoutSaving,
    ShowHelp,
    Answer(DialogAnswer),
}

/// 可點擊的區域種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Cell {
        row: usize,
        col: usize,
        control: Control,
    },
    SaveAndQuit,
    QuitWithoutSaving,
    Help,
    Dialog(DialogButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub target: HitTarget,
}

impl HitRegion {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }
}

/// 一列的顯示文字快取
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDisplay {
    pub length: String,
    pub total: String,
    pub colors: Vec<String>,
    pub counts: Vec<String>,
}

/// 最上層的應用程式物件，獨佔庫存直到結束。
///
/// 所有輸入都轉成 [`Command`] 再套用；顯示快取只在受影響的格子與該列總數上更新。
pub struct App<S: Storage> {
    inventory: Inventory,
    store: InventoryStore<S>,
    steps: StepConfig,
    display: Vec<RowDisplay>,
    selection: Option<Selection>,
    dialog: Option<Dialog>,
    hit_regions: Vec<HitRegion>,
    exit: Option<ExitReason>,
}

impl<S: Storage> App<S> {
    pub fn new(inventory: Inventory, store: InventoryStore<S>, steps: StepConfig) -> Self {
        let display = inventory
            .rows()
            .map(|(length, colors)| RowDisplay {
                length: length.to_string(),
                total: inventory.total(length).unwrap_or(0).to_string(),
                colors: colors.keys().cloned().collect(),
                counts: colors.values().map(u64::to_string).collect(),
            })
            .collect();

        let selection = (0..inventory.len())
            .find(|&row| inventory.colors_in_row(row) > 0)
            .map(|row| Selection { row, col: 0 });

        Self {
            inventory,
            store,
            steps,
            display,
            selection,
            dialog: None,
            hit_regions: Vec::new(),
            exit: None,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn store(&self) -> &InventoryStore<S> {
        &self.store
    }

    pub fn display(&self) -> &[RowDisplay] {
        &self.display
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit
    }

    pub fn hit_regions(&self) -> &[HitRegion] {
        &self.hit_regions
    }

    pub fn set_hit_regions(&mut self, regions: Vec<HitRegion>) {
        self.hit_regions = regions;
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return;
        }
        if let Some(command) = self.command_for_key(key) {
            self.apply(command);
        }
    }

    fn command_for_key(&self, key: KeyEvent) -> Option<Command> {
        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'));

        if self.dialog.is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    Some(Command::Answer(DialogAnswer::Confirm))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    Some(Command::Answer(DialogAnswer::Cancel))
                }
                _ if ctrl_c => Some(Command::Answer(DialogAnswer::Cancel)),
                _ => None,
            };
        }

        if ctrl_c {
            return Some(Command::QuitWithoutSaving);
        }

        let modifiers = ModifierState::from_key_modifiers(key.modifiers);
        let command = match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => Command::AdjustSelected {
                control: Control::Increment,
                modifiers,
            },
            KeyCode::Char('-') => Command::AdjustSelected {
                control: Control::Decrement,
                modifiers,
            },
            KeyCode::Up | KeyCode::Char('k') => Command::Move(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => Command::Move(Direction::Down),
            KeyCode::Left | KeyCode::Char('h') => Command::Move(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => Command::Move(Direction::Right),
            KeyCode::Char('s') => Command::SaveAndQuit,
            KeyCode::Char('q') | KeyCode::Esc => Command::QuitWithoutSaving,
            KeyCode::Char('?') | KeyCode::F(1) => Command::ShowHelp,
            _ => return None,
        };
        Some(command)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(target) = self
            .hit_regions
            .iter()
            .find(|region| region.contains(mouse.column, mouse.row))
            .map(|region| region.target)
        else {
            return;
        };

        let command = match target {
            HitTarget::Dialog(button) => Command::Answer(button.answer()),
            // 對話框開啟時，其他區域不回應
            _ if self.dialog.is_some() => return,
            HitTarget::Cell { row, col, control } => Command::Adjust {
                row,
                col,
                control,
                modifiers: ModifierState::from_mouse_modifiers(mouse.modifiers),
            },
            HitTarget::SaveAndQuit => Command::SaveAndQuit,
            HitTarget::QuitWithoutSaving => Command::QuitWithoutSaving,
            HitTarget::Help => Command::ShowHelp,
        };
        self.apply(command);
    }

    pub fn apply(&mut self, command: Command) {
        if self.exit.is_some() {
            return;
        }
        match command {
            Command::Adjust {
                row,
                col,
                control,
                modifiers,
            } => {
                self.selection = Some(Selection { row, col });
                self.adjust(row, col, self.steps.delta(control, modifiers));
            }
            Command::AdjustSelected { control, modifiers } => {
                if let Some(Selection { row, col }) = self.selection {
                    self.adjust(row, col, self.steps.delta(control, modifiers));
                }
            }
            Command::Move(direction) => self.move_selection(direction),
            Command::SaveAndQuit => self.save_and_quit(),
            Command::QuitWithoutSaving => self.dialog = Some(Dialog::ConfirmQuit),
            Command::ShowHelp => self.dialog = Some(Dialog::Help(self.steps)),
            Command::Answer(answer) => self.answer(answer),
        }
    }

    fn adjust(&mut self, row: usize, col: usize, delta: i64) {
        let Some((length, color)) = self.inventory.entry_at(row, col) else {
            return;
        };
        let (length, color) = (length.to_string(), color.to_string());

        if let Some(count) = self.inventory.adjust(&length, &color, delta) {
            tracing::debug!("{} / {}: {:+} -> {}", length, color, delta, count);
            let total = self.inventory.total(&length).unwrap_or(0);
            let row_display = &mut self.display[row];
            row_display.counts[col] = count.to_string();
            row_display.total = total.to_string();
        }
    }

    fn move_selection(&mut self, direction: Direction) {
        let Some(Selection { row, col }) = self.selection else {
            return;
        };

        let next = match direction {
            Direction::Left => Some(Selection {
                row,
                col: col.saturating_sub(1),
            }),
            Direction::Right => {
                let last = self.inventory.colors_in_row(row).saturating_sub(1);
                Some(Selection {
                    row,
                    col: (col + 1).min(last),
                })
            }
            Direction::Up => (0..row)
                .rev()
                .find(|&r| self.inventory.colors_in_row(r) > 0)
                .map(|r| self.clamped(r, col)),
            Direction::Down => (row + 1..self.inventory.len())
                .find(|&r| self.inventory.colors_in_row(r) > 0)
                .map(|r| self.clamped(r, col)),
        };

        if let Some(next) = next {
            self.selection = Some(next);
        }
    }

    fn clamped(&self, row: usize, col: usize) -> Selection {
        let last = self.inventory.colors_in_row(row).saturating_sub(1);
        Selection {
            row,
            col: col.min(last),
        }
    }

    fn save_and_quit(&mut self) {
        match self.store.save(&self.inventory) {
            Ok(()) => {
                tracing::info!("✅ Saved, quitting");
                self.exit = Some(ExitReason::Saved);
            }
            Err(e) => {
                tracing::error!("❌ Save failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                self.dialog = Some(Dialog::error("Save failed", &e));
            }
        }
    }

    fn answer(&mut self, answer: DialogAnswer) {
        match (self.dialog.take(), answer) {
            (Some(Dialog::ConfirmQuit), DialogAnswer::Confirm) => {
                tracing::info!("🚪 Quitting without saving");
                self.exit = Some(ExitReason::Discarded);
            }
            (Some(Dialog::ConfirmQuit), DialogAnswer::Cancel) => {
                tracing::debug!("Quit cancelled");
            }
            _ => {}
        }
    }
}
