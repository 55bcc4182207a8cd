pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod factory;
pub mod runtime;
pub mod telemetry;
pub mod time_utils;
