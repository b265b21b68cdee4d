use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(detect(flags, std::io::stdout().is_terminal()));
}

fn detect(flags: &GlobalFlags, stdout_is_tty: bool) -> UiPrefs {
    let table_color = stdout_is_tty
        && flags.format == OutputFormat::Table
        && !flags.quiet
        && std::env::var_os("NO_COLOR").is_none();

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}
