//! One-line status messages on stderr, prefixed with a glyph.

use super::colors_enabled;
use owo_colors::{OwoColorize, Style};

fn emit(glyph: &str, glyph_style: Style, message: &str, message_style: Style) {
    if colors_enabled() {
        eprintln!(
            "{} {}",
            glyph.style(glyph_style),
            message.style(message_style)
        );
    } else {
        eprintln!("{glyph} {message}");
    }
}

pub fn success(message: &str) {
    emit("✓", Style::new().green().bold(), message, Style::new());
}

pub fn info(message: &str) {
    emit("ℹ", Style::new().blue().bold(), message, Style::new());
}

/// Warnings and errors color the whole line, not only the glyph.
pub fn warning(message: &str) {
    emit(
        "⚠",
        Style::new().yellow().bold(),
        message,
        Style::new().yellow(),
    );
}

pub fn error(message: &str) {
    emit("✗", Style::new().red().bold(), message, Style::new().red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn messages_print_in_both_color_modes() {
        for colored in [false, true] {
            crate::ui::init_colors(!colored);
            success("Home page title matches");
            info("Checking 42 links");
            warning("No credentials configured");
            error("Logo is not visible");
        }
        crate::ui::init_colors(false);
    }
}
