#![forbid(unsafe_code)]

pub mod atomic;
pub mod generate;
pub mod layout;
pub mod report;
