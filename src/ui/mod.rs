pub mod calendar;
pub mod daily;
pub mod messages;
