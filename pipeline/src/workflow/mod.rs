pub mod config;
pub mod event;
pub mod runner;
pub mod sink;
