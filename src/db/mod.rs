pub mod custom_issues;
pub mod log;
pub mod migrate;
pub mod placeholders;
pub mod pool;
pub mod stats;
pub mod users;
