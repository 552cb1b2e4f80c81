/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Highlight for "today" in the grid (reverse video).
pub const REVERSE: &str = "\x1b[7m";

/// Colour of a day total:
/// nothing booked → grey,
/// below `expected` → red,
/// otherwise → green.
pub fn color_for_day_total(total: f64, expected: f64) -> &'static str {
    if total <= 0.0 {
        GREY
    } else if total < expected {
        RED
    } else {
        GREEN
    }
}

/// Colour of a placeholder by kind code (`Doctor`, `Vacation`, ...).
pub fn color_for_placeholder(kind: &str) -> &'static str {
    match kind {
        "Doctor" => CYAN,
        "Vacation" => BLUE,
        "Holiday" => MAGENTA,
        "Sickday" => YELLOW,
        _ => RESET,
    }
}

/// Wrap `text` in `color` unless it is empty.
pub fn paint(color: &str, text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("{color}{text}{RESET}")
    }
}
