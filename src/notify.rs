use log::info;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

const TITLE: &str = "Batch Excel";

/// User-facing messages raised while a batch runs.
pub trait Notifier {
    fn warn(&self, message: &str);
    /// Ask before writing. `false` aborts the run.
    fn confirm(&self, message: &str) -> bool;
    fn info(&self, message: &str);
}

/// Headless runs: every question is answered yes.
///
/// Warnings are dropped; the error behind them is logged once by `main`.
pub struct Silent;

impl Notifier for Silent {
    fn warn(&self, _message: &str) {}

    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn info(&self, message: &str) {
        info!("{}", message);
    }
}

/// Native message boxes.
pub struct Dialog;

impl Dialog {
    fn show(level: MessageLevel, buttons: MessageButtons, message: &str) -> MessageDialogResult {
        MessageDialog::new()
            .set_title(TITLE)
            .set_level(level)
            .set_buttons(buttons)
            .set_description(message)
            .show()
    }
}

impl Notifier for Dialog {
    fn warn(&self, message: &str) {
        Dialog::show(MessageLevel::Warning, MessageButtons::Ok, message);
    }

    fn confirm(&self, message: &str) -> bool {
        matches!(
            Dialog::show(MessageLevel::Info, MessageButtons::YesNo, message),
            MessageDialogResult::Yes
        )
    }

    fn info(&self, message: &str) {
        info!("{}", message);
        Dialog::show(MessageLevel::Info, MessageButtons::Ok, message);
    }
}
