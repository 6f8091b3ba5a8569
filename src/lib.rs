pub mod cli;
pub mod clients;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod logging;
pub mod models;
pub mod report;
pub mod restarts;
pub mod secrets;
pub mod summary;
pub mod verify;

/// Exit status for missing required input (empty secret, no API key).
pub const EXIT_USAGE: u8 = 2;
