use crate::errors::AppError;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";
const FG_GREY: &str = "\x1b[90m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_KEY: &str = "🔑";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Secondary lines under a message, greyed out and wrapped.
pub fn hint<T: fmt::Display>(msg: T) {
    let text = msg.to_string();
    for line in textwrap::wrap(&text, 76) {
        println!("   {}{}{}", FG_GREY, line, RESET);
    }
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} =={}", FG_BLUE, BOLD, msg, RESET);
}

/// Report a failed remote load inline, with a pointer to the fix when the
/// problem is missing or rejected credentials.
pub fn remote_failure(err: &AppError) {
    error(err);
    match err {
        AppError::Config(_) => hint(format!(
            "{ICON_KEY} Configure Redmine with `rtcal config --edit` and `rtcal apikey --set <KEY>`."
        )),
        AppError::Unauthenticated => hint("Log in with `rtcal login <user>` or pass --user."),
        AppError::Unauthorized(_) => hint("Check the key with `rtcal apikey --verify`."),
        AppError::RateLimited(_) => hint("Nothing was retried; run the command again later."),
        _ => {}
    }
}
