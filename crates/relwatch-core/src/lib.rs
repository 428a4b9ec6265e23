//! Relwatch Core - Domain types for the release document watcher.

mod types;

pub use types::*;
