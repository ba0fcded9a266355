//! Formatting utilities for sizes and inject summaries.

use console::Term;
use owo_colors::OwoColorize;

/// Format file size in human-readable format.
///
/// ```
/// use docsite_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Print the patched files with their new sizes to stderr.
///
/// ```no_run
/// use docsite_cli::ui::print_inject_summary;
///
/// print_inject_summary(&[("index.zh-CN.js".to_string(), 15_234)]);
/// ```
pub fn print_inject_summary(files: &[(String, u64)]) {
    let width = Term::stderr().size().1 as usize;

    eprintln!("\n{}", "Module Info".bold().underline());
    eprintln!("{}", "─".repeat(width.min(80)));
    for (name, size) in files {
        eprintln!(
            "  {} {} {}",
            "▸".blue(),
            name.bright_white().bold(),
            format_size(*size).dimmed()
        );
    }
    eprintln!("{}", "─".repeat(width.min(80)));

    let total: u64 = files.iter().map(|(_, size)| size).sum();
    eprintln!("  {} {}", "Total:".bold(), format_size(total).green());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_fractions() {
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_format_size_caps_at_gigabytes() {
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024), "2048.00 GB");
    }
}
