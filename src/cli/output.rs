//! Help, usage, version and failure text

use crate::{config::Settings, utils::process};

pub fn render_usage(settings: &Settings) -> String {
    settings.messages.usage.clone()
}

pub fn render_help(settings: &Settings) -> String {
    let app = &settings.app;
    let mut text = format!("{} {}", app.name, app.version);
    if !app.description.is_empty() {
        text.push('\n');
        text.push_str(&app.description);
    }
    text.push_str("\n\n");
    text.push_str(&settings.messages.usage);
    if !settings.messages.help.is_empty() {
        text.push_str("\n\n");
        text.push_str(&settings.messages.help);
    }
    text
}

pub fn render_version(settings: &Settings) -> String {
    format!("{} {}", settings.app.name, settings.app.version)
}

pub fn render_failure(settings: &Settings) -> String {
    settings.messages.failure.clone()
}

pub fn print_usage(settings: &Settings) {
    process::stdout(&render_usage(settings));
}

pub fn print_help(settings: &Settings) {
    process::stdout(&render_help(settings));
}

pub fn print_version(settings: &Settings) {
    process::stdout(&render_version(settings));
}

/// Failure text goes to stderr so it never mixes with command output
pub fn print_failure(settings: &Settings) {
    process::stderr(&render_failure(settings));
}
