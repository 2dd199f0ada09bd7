pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod ledger;
pub mod recognition;
pub mod state;
