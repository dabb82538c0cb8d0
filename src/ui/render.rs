use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::core::input::Control;
use crate::domain::ports::Storage;
use crate::ui::app::{App, HitRegion, HitTarget, Selection, TITLE};
use crate::ui::dialog::Dialog;
use crate::ui::palette;

const LABEL_WIDTH: u16 = 10;
const TOTAL_WIDTH: u16 = 10;
const BUTTON_WIDTH: u16 = 3;
const COUNT_WIDTH: u16 = 5;
const GROUP_GAP: u16 = 1;
const ROW_HEIGHT: u16 = 2;
const FOOTER_HEIGHT: u16 = 2;

const FOOTER_BUTTONS: [(&str, HitTarget); 3] = [
    ("[ Help ]", HitTarget::Help),
    ("[ Quit without Saving ]", HitTarget::QuitWithoutSaving),
    ("[ Save & Quit ]", HitTarget::SaveAndQuit),
];

fn group_width() -> u16 {
    BUTTON_WIDTH * 2 + COUNT_WIDTH + GROUP_GAP
}

/// 畫出整個畫面並記錄可點擊區域
pub fn draw<S: Storage>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();
    let mut regions = Vec::new();

    let title = format!(" {} ({}) ", TITLE, app.store().path());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid_height = inner.height.saturating_sub(FOOTER_HEIGHT);
    let grid = Rect::new(inner.x, inner.y, inner.width, grid_height);
    draw_grid(frame, app, grid, &mut regions);

    if inner.height >= FOOTER_HEIGHT {
        let footer = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        draw_footer(frame, footer, &mut regions);
    }

    if let Some(dialog) = app.dialog() {
        regions.clear();
        regions.extend(draw_dialog(frame, dialog));
    }

    app.set_hit_regions(regions);
}

fn draw_grid<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect, regions: &mut Vec<HitRegion>) {
    let visible_rows = usize::from((area.height / ROW_HEIGHT).max(1));
    // 讓選取列保持在畫面內
    let first_row = app
        .selection()
        .map(|selection| (selection.row + 1).saturating_sub(visible_rows))
        .unwrap_or(0);

    let right_edge = area.x.saturating_add(area.width);
    let groups_start = area.x + LABEL_WIDTH + 1 + TOTAL_WIDTH + 1;
    let visible_cols = usize::from((right_edge.saturating_sub(groups_start) / group_width()).max(1));
    // 顏色太多時水平捲動，讓選取欄保持可見
    let first_col = app
        .selection()
        .map(|selection| (selection.col + 1).saturating_sub(visible_cols))
        .unwrap_or(0);

    if app.inventory().is_empty() {
        if area.height > 0 {
            frame.buffer_mut().set_stringn(
                area.x,
                area.y,
                "No cable lengths in this inventory.",
                usize::from(area.width),
                Style::default().fg(Color::DarkGray),
            );
        }
        return;
    }

    let buf = frame.buffer_mut();

    for (screen_row, (row, row_display)) in app
        .display()
        .iter()
        .enumerate()
        .skip(first_row)
        .take(visible_rows)
        .enumerate()
    {
        let y = area.y + screen_row as u16 * ROW_HEIGHT;
        if y >= area.y.saturating_add(area.height) {
            break;
        }

        let mut x = area.x;
        let label = format!("{}: >", row_display.length);
        if x + LABEL_WIDTH + 1 > right_edge {
            continue;
        }
        buf.set_stringn(
            x,
            y,
            format!("{:>width$}", label, width = usize::from(LABEL_WIDTH)),
            usize::from(LABEL_WIDTH),
            Style::default().add_modifier(Modifier::BOLD),
        );
        x += LABEL_WIDTH + 1;

        if x + TOTAL_WIDTH + 1 > right_edge {
            continue;
        }
        buf.set_string(
            x,
            y,
            format!("{:^width$}", row_display.total, width = usize::from(TOTAL_WIDTH)),
            Style::default().add_modifier(Modifier::BOLD),
        );
        x += TOTAL_WIDTH + 1;

        if first_col > 0 && !row_display.colors.is_empty() {
            buf.set_string(x - 1, y, "<", Style::default().fg(Color::DarkGray));
        }

        for (col, (color, count)) in row_display
            .colors
            .iter()
            .zip(&row_display.counts)
            .enumerate()
            .skip(first_col)
        {
            if x + group_width() > right_edge {
                // 還有未顯示的顏色
                buf.set_string(x - 1, y, ">", Style::default().fg(Color::DarkGray));
                break;
            }
            let selected = app.selection() == Some(Selection { row, col });

            buf.set_string(x, y, "[-]", Style::default());
            regions.push(HitRegion {
                area: Rect::new(x, y, BUTTON_WIDTH, 1),
                target: HitTarget::Cell {
                    row,
                    col,
                    control: Control::Decrement,
                },
            });
            x += BUTTON_WIDTH;

            buf.set_string(
                x,
                y,
                format!("{:^width$}", count, width = usize::from(COUNT_WIDTH)),
                count_style(color, selected),
            );
            x += COUNT_WIDTH;

            buf.set_string(x, y, "[+]", Style::default());
            regions.push(HitRegion {
                area: Rect::new(x, y, BUTTON_WIDTH, 1),
                target: HitTarget::Cell {
                    row,
                    col,
                    control: Control::Increment,
                },
            });
            x += BUTTON_WIDTH + GROUP_GAP;
        }
    }
}

fn count_style(color: &str, selected: bool) -> Style {
    let mut style = match palette::parse_color(color) {
        Some(background) => Style::default().bg(background).fg(palette::contrast_fg(background)),
        None => Style::default(),
    };
    if selected {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    style
}

fn draw_footer(frame: &mut Frame, area: Rect, regions: &mut Vec<HitRegion>) {
    let buf = frame.buffer_mut();
    let hint = "+/- adjust  Alt: large step  ?: help";
    let buttons_width: u16 = FOOTER_BUTTONS
        .iter()
        .map(|(label, _)| label.len() as u16 + 1)
        .sum();

    if area.width > buttons_width + hint.len() as u16 {
        buf.set_string(area.x, area.y, hint, Style::default().fg(Color::DarkGray));
    }

    // 按鈕靠右排列，Save & Quit 在最右邊
    let mut x = area.x.saturating_add(area.width).saturating_sub(buttons_width);
    for (label, target) in FOOTER_BUTTONS {
        let width = label.len() as u16;
        if x < area.x {
            x += width + 1;
            continue;
        }
        buf.set_string(x, area.y, label, Style::default().add_modifier(Modifier::BOLD));
        regions.push(HitRegion {
            area: Rect::new(x, area.y, width, 1),
            target,
        });
        x += width + 1;
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// 畫出置中的對話框，回傳按鈕區域
pub fn draw_dialog(frame: &mut Frame, dialog: &Dialog) -> Vec<HitRegion> {
    let message = dialog.message();
    let text_width = message.lines().map(str::len).max().unwrap_or(0) as u16;
    let text_height = message.lines().count() as u16;
    let popup = centered(frame.area(), text_width.max(30) + 4, text_height + 5);

    let border_style = if dialog.is_warning() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", dialog.title()));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let lines: Vec<Line> = message.lines().map(Line::from).collect();
    let body = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(2),
    );
    if body.height > 0 {
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
    }

    let buttons = dialog.buttons();
    let total_width = buttons
        .iter()
        .map(|b| b.label().len() as u16 + 2)
        .sum::<u16>()
        .saturating_sub(2);
    let mut regions = Vec::with_capacity(buttons.len());
    if inner.height == 0 || inner.width == 0 {
        return regions;
    }
    let y = inner.y + inner.height - 1;
    let mut x = inner.x + inner.width.saturating_sub(total_width) / 2;

    let right_edge = inner.x + inner.width;
    let buf = frame.buffer_mut();
    for &button in buttons {
        let width = button.label().len() as u16;
        if x + width > right_edge {
            break;
        }
        buf.set_string(x, y, button.label(), Style::default().add_modifier(Modifier::BOLD));
        regions.push(HitRegion {
            area: Rect::new(x, y, width, 1),
            target: HitTarget::Dialog(button),
        });
        x += width + 2;
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::StepConfig;
    use crate::core::store::InventoryStore;
    use crate::domain::model::Inventory;
    use crate::ui::app::ExitReason;
    use crate::utils::error::Result;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingStorage {
        writes: Cell<usize>,
    }

    impl Storage for &CountingStorage {
        fn read_file(&self, _path: &str) -> Result<Vec<u8>> {
            Ok(b"{}".to_vec())
        }

        fn write_file(&self, _path: &str, _data: &[u8]) -> Result<()> {
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    fn app(storage: &CountingStorage) -> App<&CountingStorage> {
        let inventory =
            Inventory::from_json_str(r#"{"1m": {"blue": 4, "red": 2}, "2m": {"yellow": 0}}"#)
                .unwrap();
        App::new(
            inventory,
            InventoryStore::new(storage, "cables.json"),
            StepConfig::default(),
        )
    }

    fn render(terminal: &mut Terminal<TestBackend>, app: &mut App<&CountingStorage>) -> String {
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn click(app: &mut App<&CountingStorage>, target: HitTarget, modifiers: KeyModifiers) {
        let region = app
            .hit_regions()
            .iter()
            .find(|region| region.target == target)
            .copied()
            .unwrap();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: region.area.x,
            row: region.area.y,
            modifiers,
        });
    }

    #[test]
    fn test_grid_shows_rows_totals_and_counts() {
        let storage = CountingStorage::default();
        let mut app = app(&storage);
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();

        let screen = render(&mut terminal, &mut app);

        assert!(screen.contains("RJ45 Inventory (cables.json)"));
        assert!(screen.contains("1m: >"));
        assert!(screen.contains("2m: >"));
        assert!(screen.contains("[-]  4  [+]"));
        assert!(screen.contains("[-]  2  [+]"));
        assert!(screen.contains("[ Save & Quit ]"));
        assert!(screen.contains("[ Quit without Saving ]"));
    }

    #[test]
    fn test_click_and_shift_click_adjust() {
        let storage = CountingStorage::default();
        let mut app = app(&storage);
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        render(&mut terminal, &mut app);

        let plus_red = HitTarget::Cell {
            row: 0,
            col: 1,
            control: Control::Increment,
        };
        click(&mut app, plus_red, KeyModifiers::NONE);
        assert_eq!(app.inventory().count("1m", "red"), Some(3));

        click(&mut app, plus_red, KeyModifiers::SHIFT);
        assert_eq!(app.inventory().count("1m", "red"), Some(13));

        let screen = render(&mut terminal, &mut app);
        assert!(screen.contains("17"));
        assert!(screen.contains(" 13 "));
    }

    #[test]
    fn test_dialog_replaces_grid_targets() {
        let storage = CountingStorage::default();
        let mut app = app(&storage);
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        render(&mut terminal, &mut app);

        click(&mut app, HitTarget::QuitWithoutSaving, KeyModifiers::NONE);
        let screen = render(&mut terminal, &mut app);
        assert!(screen.contains("Your changes won't be saved."));
        assert!(app
            .hit_regions()
            .iter()
            .all(|region| matches!(region.target, HitTarget::Dialog(_))));

        click(&mut app, HitTarget::Dialog(crate::ui::dialog::DialogButton::No), KeyModifiers::NONE);
        assert_eq!(app.dialog(), None);
        assert_eq!(app.exit_reason(), None);
        assert_eq!(storage.writes.get(), 0);
    }

    #[test]
    fn test_save_button_saves_and_exits() {
        let storage = CountingStorage::default();
        let mut app = app(&storage);
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        render(&mut terminal, &mut app);

        click(&mut app, HitTarget::SaveAndQuit, KeyModifiers::NONE);
        assert_eq!(app.exit_reason(), Some(ExitReason::Saved));
        assert_eq!(storage.writes.get(), 1);
    }

    #[test]
    fn test_selected_column_scrolls_into_view() {
        let storage = CountingStorage::default();
        let inventory = Inventory::from_json_str(
            r#"{"1m": {"blue": 1, "red": 2, "yellow": 3, "green": 4, "white": 5, "black": 77}}"#,
        )
        .unwrap();
        let mut app = App::new(
            inventory,
            InventoryStore::new(&storage, "cables.json"),
            StepConfig::default(),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();

        let screen = render(&mut terminal, &mut app);
        assert!(!screen.contains(" 77 "));
        assert!(!screen.contains("<"));

        for _ in 0..5 {
            app.apply(crate::ui::app::Command::Move(crate::ui::app::Direction::Right));
        }
        app.apply(crate::ui::app::Command::AdjustSelected {
            control: Control::Increment,
            modifiers: crate::core::input::ModifierState::Plain,
        });
        let screen = render(&mut terminal, &mut app);

        assert_eq!(app.inventory().count("1m", "black"), Some(78));
        assert!(screen.contains(" 78 "));
        assert!(screen.contains("<"));
        assert!(app.hit_regions().iter().any(|region| region.target
            == HitTarget::Cell {
                row: 0,
                col: 5,
                control: Control::Increment,
            }));
        assert!(!app.hit_regions().iter().any(|region| matches!(
            region.target,
            HitTarget::Cell { col: 0, .. }
        )));
    }

    #[test]
    fn test_empty_inventory_shows_placeholder() {
        let storage = CountingStorage::default();
        let mut app = App::new(
            Inventory::default(),
            InventoryStore::new(&storage, "cables.json"),
            StepConfig::default(),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();

        let screen = render(&mut terminal, &mut app);
        assert!(screen.contains("No cable lengths in this inventory."));
        assert!(screen.contains("[ Save & Quit ]"));
    }

    #[test]
    fn test_single_line_terminal_with_dialog_does_not_panic() {
        let storage = CountingStorage::default();
        let mut app = app(&storage);
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();

        app.apply(crate::ui::app::Command::ShowHelp);
        render(&mut terminal, &mut app);
        assert!(app.hit_regions().is_empty());

        app.apply(crate::ui::app::Command::Answer(
            crate::ui::dialog::DialogAnswer::Confirm,
        ));
        app.apply(crate::ui::app::Command::QuitWithoutSaving);
        render(&mut terminal, &mut app);

        let mut tiny = Terminal::new(TestBackend::new(4, 2)).unwrap();
        tiny.draw(|frame| {
            draw_dialog(frame, &Dialog::Help(StepConfig::default()));
        })
        .unwrap();
    }

    #[test]
    fn test_narrow_terminal_does_not_panic() {
        let storage = CountingStorage::default();
        let mut app = app(&storage);
        let mut terminal = Terminal::new(TestBackend::new(12, 3)).unwrap();
        render(&mut terminal, &mut app);
        app.apply(crate::ui::app::Command::ShowHelp);
        render(&mut terminal, &mut app);
    }
}
