// Per-code verification pipeline, leaf first
pub mod sequence;
pub mod fetch;
pub mod extract;
pub mod search;
pub mod classify;
pub mod report;
