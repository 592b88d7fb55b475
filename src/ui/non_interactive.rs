//! Non-interactive UI for CI/headless environments.
//!
//! Plain line-oriented output: no spinners, no cursor movement.

use super::theme::EnvCheckTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: EnvCheckTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: EnvCheckTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let visible = self.mode.shows_progress();
        if visible {
            println!("{}", message);
        }
        Box::new(LineSpinner {
            visible,
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        println!("{}", title);
    }
}

/// Prints the finishing line only; there is nothing to animate.
struct LineSpinner {
    visible: bool,
    theme: EnvCheckTheme,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            println!("   {}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.visible {
            println!("   {}", self.theme.format_error(msg));
        }
    }
}
