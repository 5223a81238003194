//! Workload generation and replay for `docstore`.

pub mod generator;
pub mod input;
pub mod models;
pub mod runner;
pub mod stats;
