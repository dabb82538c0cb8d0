use std::io::{self, Stdout};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::domain::ports::Storage;
use crate::ui::app::{App, ExitReason, HitRegion};
use crate::ui::dialog::Dialog;
use crate::ui::render;
use crate::utils::error::{InventoryError, Result};

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let terminal = restore_on_error(Terminal::new(CrosstermBackend::new(stdout)), || {
        let _ = restore_terminal();
    })?;
    install_panic_hook();
    Ok(terminal)
}

/// 初始化失敗時先還原終端機，再把錯誤往上傳
fn restore_on_error<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}

/// panic 時先還原終端機，避免畫面卡在 raw mode
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original(info);
    }));
}

/// 執行主迴圈直到使用者確認離開
pub fn run<S: Storage>(app: &mut App<S>) -> Result<ExitReason> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, app);
    let cleanup = restore_terminal();

    let reason = result?;
    cleanup?;
    Ok(reason)
}

fn event_loop<S: Storage>(terminal: &mut Tui, app: &mut App<S>) -> Result<ExitReason> {
    loop {
        terminal.draw(|frame| render::draw(frame, app))?;

        app.handle_event(event::read()?);

        if let Some(reason) = app.exit_reason() {
            return Ok(reason);
        }
    }
}

/// 啟動失敗時顯示錯誤對話框，按任意鍵後返回
pub fn show_fatal_error(err: &InventoryError) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let dialog = Dialog::error("Cannot load inventory", err);

    let mut regions: Vec<HitRegion> = Vec::new();

    let result = (|| -> Result<()> {
        loop {
            regions.clear();
            terminal.draw(|frame| regions.extend(render::draw_dialog(frame, &dialog)))?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
                Event::Mouse(mouse)
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                        && regions
                            .iter()
                            .any(|region| region.contains(mouse.column, mouse.row)) =>
                {
                    return Ok(())
                }
                _ => {}
            }
        }
    })();

    let cleanup = restore_terminal();
    result?;
    cleanup?;
    Ok(())
}
