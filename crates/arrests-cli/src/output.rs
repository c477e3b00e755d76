//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 16;

/// Outcome of one check.
pub enum CheckStatus {
    Ok(String),
    Warning(String),
    Failed(String),
}

/// One line of the `check` report.
pub struct CheckLine {
    pub label: String,
    pub status: CheckStatus,
    pub elapsed: Duration,
}

/// Print a check line: marker, label, value, elapsed time.
pub fn print_check(line: &CheckLine) {
    let (marker, value): (ColoredString, ColoredString) = match &line.status {
        CheckStatus::Ok(v) => ("✓".green(), pad_right(v, VALUE_WIDTH).normal()),
        CheckStatus::Warning(v) => ("!".yellow(), pad_right(v, VALUE_WIDTH).yellow()),
        CheckStatus::Failed(v) => ("✗".red(), v.as_str().red()),
    };

    let label = pad_right(&truncate_visual(&line.label, LABEL_WIDTH), LABEL_WIDTH);
    if matches!(line.status, CheckStatus::Failed(_)) {
        println!("  {} {} {} {}", marker, label, format_elapsed(line.elapsed).dimmed(), value);
    } else {
        println!("  {} {} {} {}", marker, label, value, format_elapsed(line.elapsed).dimmed());
    }
}

/// Elapsed time in milliseconds, one decimal.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1} ms", elapsed.as_secs_f64() * 1000.0)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ok", 4), "ok  ");
        assert_eq!(pad_right("exists", 3), "exists");
    }

    #[test]
    fn test_truncate_visual() {
        assert_eq!(truncate_visual("Projection 'mygraph2'", 10), "Projecti..");
        assert_eq!(truncate_visual("short", 10), "short");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_micros(12_340)), "12.3 ms");
    }
}
