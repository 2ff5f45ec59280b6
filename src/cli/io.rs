use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

use crate::errors::CliError;

/// Prompt for free-form text, pre-filled with the current value.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(CliError::from)
}

/// Prompt for a secret without echoing it.
pub fn prompt_secret(theme: &ColorfulTheme, prompt: &str) -> Result<String, CliError> {
    Password::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(CliError::from)
}

/// Let the user pick one entry; returns its index.
pub fn choose(theme: &ColorfulTheme, prompt: &str, items: &[String]) -> Result<usize, CliError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(CliError::from)
}
