pub mod banner;
pub mod chain;
pub mod classifier;
pub mod config;
pub mod consts;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod recognizer;
pub mod server;
pub mod strategy;
