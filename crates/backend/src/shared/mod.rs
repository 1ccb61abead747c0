pub mod cache;
pub mod config;
pub mod data;
pub mod envelope;
pub mod error;
pub mod format;
pub mod query;
pub mod state;
