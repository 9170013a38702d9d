pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod daemon;
pub mod logging;
pub mod runtime;
pub mod service_identification;
pub mod storage;
pub mod types;
pub mod utils;
pub mod watcher;
