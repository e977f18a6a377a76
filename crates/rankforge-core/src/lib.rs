#![forbid(unsafe_code)]

pub mod actions;
pub mod config;
pub mod documents;
pub mod errors;
pub mod schema;
pub mod stats;
pub mod types;
