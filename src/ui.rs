use colored::Colorize;
use dialoguer::theme::ColorfulTheme;

pub fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// In-flight line shown while a backend request is outstanding.
pub fn progress(message: &str) {
    eprintln!("{}", message.bright_black());
}
