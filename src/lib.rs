pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod output;
pub mod serde_helpers;
pub mod time;
pub mod views;
