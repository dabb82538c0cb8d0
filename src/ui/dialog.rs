use crate::core::input::StepConfig;
use crate::utils::error::InventoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Yes,
    No,
    Ok,
}

impl DialogButton {
    pub fn label(self) -> &'static str {
        match self {
            DialogButton::Yes => "[ Yes ]",
            DialogButton::No => "[ No ]",
            DialogButton::Ok => "[ OK ]",
        }
    }

    pub fn answer(self) -> DialogAnswer {
        match self {
            DialogButton::Yes | DialogButton::Ok => DialogAnswer::Confirm,
            DialogButton::No => DialogAnswer::Cancel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAnswer {
    Confirm,
    Cancel,
}

/// 模態對話框；開啟時攔截所有輸入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    ConfirmQuit,
    Error { title: String, message: String },
    Help(StepConfig),
}

impl Dialog {
    pub fn error(title: &str, err: &InventoryError) -> Self {
        Dialog::Error {
            title: title.to_string(),
            message: format!(
                "{}\n\n{}.",
                err.user_friendly_message(),
                err.recovery_suggestion()
            ),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Dialog::ConfirmQuit => "Quit without Saving",
            Dialog::Error { title, .. } => title,
            Dialog::Help(_) => "Help",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Dialog::ConfirmQuit => {
                "Your changes won't be saved.\nAre you sure you want to quit?".to_string()
            }
            Dialog::Error { message, .. } => message.clone(),
            Dialog::Help(steps) => help_text(steps),
        }
    }

    pub fn buttons(&self) -> &'static [DialogButton] {
        match self {
            Dialog::ConfirmQuit => &[DialogButton::Yes, DialogButton::No],
            Dialog::Error { .. } | Dialog::Help(_) => &[DialogButton::Ok],
        }
    }

    pub fn is_warning(&self) -> bool {
        !matches!(self, Dialog::Help(_))
    }
}

pub fn help_text(steps: &StepConfig) -> String {
    format!(
        "{} v{}\n\
         \n\
         +  or  =     add {small} to the selected count\n\
         -            remove {small} from the selected count\n\
         Alt/Ctrl     with +/- changes by {large}\n\
         Click [-]/[+] to adjust, Shift-click for {large}\n\
         Arrows/hjkl  move the selection\n\
         s            save & quit\n\
         q / Esc      quit without saving\n\
         \n\
         Author: {}",
        super::app::TITLE,
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        small = steps.small_step,
        large = steps.large_step,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_quit_has_yes_and_no() {
        let dialog = Dialog::ConfirmQuit;
        assert_eq!(dialog.buttons(), &[DialogButton::Yes, DialogButton::No]);
        assert!(dialog.message().contains("won't be saved"));
        assert_eq!(DialogButton::No.answer(), DialogAnswer::Cancel);
    }

    #[test]
    fn test_help_mentions_version() {
        let text = Dialog::Help(StepConfig::default()).message();
        assert!(text.contains("changes by 10"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
        assert!(text.contains("Author"));
    }
}
