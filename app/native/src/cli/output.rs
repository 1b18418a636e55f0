//! CLI output formatting.
//!
//! Tables come from `tabled`; JSON is pretty-printed and syntax highlighted
//! with `colored`.

use colored::Colorize;
use serde::Serialize;

use crate::error::ConcertinaError;

/// Serializes `value` and prints it highlighted.
///
/// # Errors
///
/// Returns an error when `value` cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), ConcertinaError> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{}", highlight_json(&pretty));
    Ok(())
}

/// Colors a pretty-printed JSON document.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut chars = json.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut literal = String::from('"');
                let mut escaped = false;
                for c in chars.by_ref() {
                    literal.push(c);
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        break;
                    }
                }
                // Keys are the strings followed by a colon.
                let is_key = chars.clone().find(|c| !c.is_whitespace()) == Some(':');
                let colored = if is_key { literal.cyan() } else { literal.green() };
                out.push_str(&colored.to_string());
            }
            '{' | '[' | '}' | ']' => out.push_str(&ch.to_string().white().bold().to_string()),
            ',' | ':' => out.push(ch),
            c if c.is_whitespace() => out.push(c),
            c => {
                let mut scalar = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next == ',' || next == '}' || next == ']' || next.is_whitespace() {
                        break;
                    }
                    scalar.push(next);
                    chars.next();
                }
                let colored = match scalar.as_str() {
                    "true" | "false" | "null" => scalar.magenta(),
                    _ => scalar.yellow(),
                };
                out.push_str(&colored.to_string());
            }
        }
    }

    out
}

/// Formats a boolean as a colored check mark.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

/// Formats a pixel value without a fractional part when it has none.
#[must_use]
pub fn format_px(value: f64) -> String {
    if value.fract() == 0.0 { format!("{value:.0}") } else { format!("{value:.1}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(json: &str) -> String {
        colored::control::set_override(false);
        highlight_json(json)
    }

    #[test]
    fn test_highlight_preserves_text_without_colors() {
        let json = "{\n  \"name\": \"a, b\",\n  \"count\": 3,\n  \"ok\": true,\n  \"none\": null\n}";
        assert_eq!(plain(json), json);
    }

    #[test]
    fn test_highlight_handles_escaped_quotes() {
        let json = r#"{"title": "say \"hi\""}"#;
        assert_eq!(plain(json), json);
    }

    #[test]
    fn test_format_bool() {
        assert!(format_bool(true).contains('✓'));
        assert!(format_bool(false).contains('✗'));
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(8.0), "8");
        assert_eq!(format_px(948.5), "948.5");
    }
}
