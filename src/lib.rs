pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod models;
pub mod notifications;
