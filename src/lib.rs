pub mod combinations;
pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod pipeline;
pub mod scorer;
// cmd and reports are binary modules (see main.rs).
