use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::wizard::Theme;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

static THEME: OnceLock<RwLock<Theme>> = OnceLock::new();

pub fn set_theme(theme: Theme) {
    let lock = THEME.get_or_init(|| RwLock::new(Theme::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = theme;
    }
}

fn theme() -> Theme {
    THEME
        .get_or_init(|| RwLock::new(Theme::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn icon(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "[i]",
        MessageKind::Success => "[✓]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Section => "",
    }
}

pub(crate) fn apply_style(kind: MessageKind, message: impl fmt::Display, theme: Theme) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => format!("{} {}", icon(kind), text),
    };

    // Bright variants read better on dark backgrounds.
    match (kind, theme) {
        (MessageKind::Info, _) => formatted,
        (MessageKind::Section, _) => formatted.bold().to_string(),
        (MessageKind::Success, Theme::Dark) => formatted.bright_green().to_string(),
        (MessageKind::Success, Theme::Light) => formatted.green().to_string(),
        (MessageKind::Warning, Theme::Dark) => formatted.bright_yellow().to_string(),
        (MessageKind::Warning, Theme::Light) => formatted.yellow().to_string(),
        (MessageKind::Error, Theme::Dark) => formatted.bright_red().to_string(),
        (MessageKind::Error, Theme::Light) => formatted.red().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message, theme());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}
