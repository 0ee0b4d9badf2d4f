//! Application service layer - config, scanning, assessment, export

pub mod app;
pub mod catalog;
pub mod config;
pub mod export;
pub mod scanner;
