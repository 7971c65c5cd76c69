pub mod bytes;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_system;
pub mod output;
pub mod usage;
pub mod utils;
