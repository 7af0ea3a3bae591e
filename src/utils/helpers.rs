//! Helpers for skiff.
//!
//! Remote path arithmetic (slash-separated, "" = root), byte-size and
//! width formatting for the panel rows, color parsing for the theme, and
//! the collision-avoiding target path used when saving downloads.
//!
//! These helpers are used throughout skiff.

use humansize::{DECIMAL, format_size};
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

use std::path::{Path, PathBuf};

/// Joins a remote directory path and an entry name. The root is "" so a
/// plain join would produce a leading slash the service rejects.
pub fn join_remote_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Strips the final segment of a remote path. Empty segments are ignored,
/// so "a//b" and "a/b" both have parent "a"; a single segment parents to
/// the root ("").
pub fn parent_remote_path(path: &str) -> String {
    let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    parts.pop();
    parts.join("/")
}

/// Formats an entry size for display. Directories show no size at all.
pub fn format_entry_size(size: u64, is_dir: bool) -> String {
    if is_dir || size == 0 {
        String::new()
    } else {
        format_size(size, DECIMAL)
    }
}

/// Truncates `line` to `width` display columns and pads with spaces so the
/// result is exactly `width` wide. Control characters are dropped.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for char in line.chars() {
        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }

        out.push(char);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }

    out
}

/// Finds an unused variant of `path` by appending `_1`, `_2`, ... to the
/// file stem. Used for download targets so an existing file is never
/// overwritten.
///
/// Example: "notes.txt" -> "notes_1.txt"
pub fn get_unused_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let name = path.file_name().unwrap_or_default();

    let stem = Path::new(name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let ext = Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let new_name = format!("{}_{}{}", stem, counter, ext);
        let target = parent.join(new_name);
        if !target.exists() {
            return target;
        }
        counter += 1;
    }
}

/// Parses a string (color name or hex) into a ratatui::style::Color.
///
/// Supports standard names (red, green, etc.) as well as hex values
/// (#RRGGBB or #RGB).
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" => Color::Gray,
        "darkgray" => Color::DarkGray,
        _ => {
            if let Some(color) = s.strip_prefix('#') {
                match color.len() {
                    6 => {
                        if let Ok(rgb) = u32::from_str_radix(color, 16) {
                            return Color::Rgb(
                                ((rgb >> 16) & 0xFF) as u8,
                                ((rgb >> 8) & 0xFF) as u8,
                                (rgb & 0xFF) as u8,
                            );
                        }
                    }
                    3 => {
                        let expanded = color
                            .chars()
                            .map(|c| format!("{}{}", c, c))
                            .collect::<String>();
                        if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                            return Color::Rgb(
                                ((rgb >> 16) & 0xFF) as u8,
                                ((rgb >> 8) & 0xFF) as u8,
                                (rgb & 0xFF) as u8,
                            );
                        }
                    }
                    _ => {}
                }
            }
            Color::Reset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn join_and_parent_round_trip() {
        assert_eq!(join_remote_path("", "models"), "models");
        assert_eq!(join_remote_path("models", "loras"), "models/loras");

        assert_eq!(parent_remote_path("models/loras"), "models");
        assert_eq!(parent_remote_path("models"), "");
        assert_eq!(parent_remote_path(""), "");
        assert_eq!(parent_remote_path("a//b"), "a");
    }

    #[test]
    fn entry_size_formatting() {
        assert_eq!(format_entry_size(0, false), "");
        assert_eq!(format_entry_size(1_500, true), "", "directories show no size");

        let formatted = format_entry_size(1_500, false);
        assert!(formatted.starts_with("1.5"), "got {}", formatted);
        assert!(formatted.ends_with("kB"), "got {}", formatted);
        assert_eq!(format_entry_size(500, false), "500 B");
    }

    #[test]
    fn sanitize_produces_exact_width() {
        let cases = vec![
            ("short.txt", 10),
            ("very_long_filename.txt", 10),
            ("🦀_crab.rs", 10),
            ("\u{7}bell", 10),
        ];

        for (input, expected) in cases {
            let result = sanitize_to_exact_width(input, expected);
            let actual = unicode_width::UnicodeWidthStr::width(result.as_str());
            assert_eq!(
                actual, expected,
                "wrong width for input '{}', got '{}'",
                input, result
            );
        }
    }

    #[test]
    fn unused_path_counts_up() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("data.csv");
        assert_eq!(get_unused_path(&path), path);

        File::create(&path)?;
        assert_eq!(get_unused_path(&path), dir.path().join("data_1.csv"));

        File::create(dir.path().join("data_1.csv"))?;
        assert_eq!(get_unused_path(&path), dir.path().join("data_2.csv"));
        Ok(())
    }

    #[test]
    fn parse_color_names_and_hex() {
        assert_eq!(parse_color("red"), Color::Red);
        assert_eq!(parse_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#f00"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("not-a-color"), Color::Reset);
    }
}
