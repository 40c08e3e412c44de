#![doc = include_str!("../README.md")]

pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod log;
pub mod tools;

mod tests;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use tools::classify::{classify, Classification, ProductSignals};
pub use tools::fetch::{Fetcher, ProbeOutcome, ProbeStatus, ReqwestFetcher};
pub use tools::search::SearchOutcome;
pub use tools::sequence::{CodeRange, ProductCode};
