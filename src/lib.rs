pub mod catalog;
pub mod cli;
pub mod config;
pub mod coords;
pub mod error;
pub mod photos;
pub mod prompt;
pub mod reconcile;
pub mod scrape;
pub mod sign;
