pub mod ai;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod platform;
pub mod ui;
