//! File watcher for live config reload.
//!
//! Uses the `notify` crate to watch the config file, re-parses it after a
//! 500ms quiet period and publishes the new config.

mod config_watcher;


pub use config_watcher::{ConfigWatcher, DEBOUNCE};
