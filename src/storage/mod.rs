pub mod config;

pub mod progress;

pub mod session_cache;

pub(crate) mod utils;
