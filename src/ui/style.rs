//! ANSI styling for the line-oriented interface.
//!
//! One color per message kind, applied at the call site. Crossterm resets
//! the style after each styled fragment, so nothing leaks across lines.

use crossterm::style::{StyledContent, Stylize};

/// Session banners and status lines.
pub fn info(text: &str) -> StyledContent<&str> {
    text.green()
}

/// Menu entries and the thinking placeholder.
pub fn listing(text: &str) -> StyledContent<&str> {
    text.cyan()
}

/// Input prompts.
pub fn prompt(text: &str) -> StyledContent<&str> {
    text.blue()
}

/// Streamed response fragments.
pub fn reply(text: &str) -> StyledContent<&str> {
    text.yellow()
}

/// Validation and remote-call errors.
pub fn error(text: &str) -> StyledContent<&str> {
    text.red()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_output_keeps_the_plain_text() {
        for styled in [
            format!("{}", info("banner")),
            format!("{}", listing("banner")),
            format!("{}", prompt("banner")),
            format!("{}", reply("banner")),
            format!("{}", error("banner")),
        ] {
            assert!(styled.contains("banner"));
        }
    }
}
