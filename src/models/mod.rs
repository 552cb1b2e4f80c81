pub mod calendar_entry;
pub mod date_window;
pub mod issue;
pub mod placeholder;
pub mod placeholder_kind;
pub mod time_entry;
