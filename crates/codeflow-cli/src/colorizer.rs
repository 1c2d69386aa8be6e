//! Terminal colorization for preview output
//!
//! Applies ANSI escape codes with crossterm. Only the separators between
//! fragments and the listing markers are colored; code is left untouched.

use clap::ValueEnum;
use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use std::path::Path;

/// Line placed between fragments in a preview
const SEPARATOR_LINE: &str = "---";

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Decide for a destination; `None` or `-` means stdout
    pub fn should_colorize(self, output: Option<&Path>) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                match output {
                    None => std::io::stdout().is_tty(),
                    Some(p) if p.to_str() == Some("-") => std::io::stdout().is_tty(),
                    Some(_) => false,
                }
            }
        }
    }
}

/// Color the fragment separators of a preview
pub fn colorize_preview(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 16);

    for line in input.lines() {
        if line == SEPARATOR_LINE {
            result.push_str(&format!("{}", line.with(Color::Cyan)));
        } else {
            result.push_str(line);
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

/// An id such as `item-3` in listings
pub fn highlight_id(id: &str, enabled: bool) -> String {
    if enabled {
        format!("{}", id.with(Color::Yellow))
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_is_colored() {
        let input = "a\n\n---\n\nb";
        let output = colorize_preview(input);
        assert!(output.contains("---"));
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(output.contains("\x1b["));
        }
        assert!(output.starts_with("a\n\n"));
        assert!(output.ends_with("\n\nb"));
    }

    #[test]
    fn test_code_is_not_colored() {
        let input = "x = 1 --- 2\n----";
        assert_eq!(colorize_preview(input), input);
    }

    #[test]
    fn test_trailing_newline_preserved() {
        assert_eq!(colorize_preview("a\n"), "a\n");
        assert_eq!(colorize_preview(""), "");
    }

    #[test]
    fn test_explicit_choices() {
        assert!(ColorChoice::Always.should_colorize(None));
        assert!(!ColorChoice::Never.should_colorize(None));
        assert!(!ColorChoice::Auto.should_colorize(Some(Path::new("out.txt"))));
    }

    #[test]
    fn test_highlight_id() {
        assert_eq!(highlight_id("item-1", false), "item-1");
        assert!(highlight_id("item-1", true).contains("item-1"));
    }
}
