pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod github;
pub mod model;
pub mod report;
pub mod retry;
pub mod stats;
