pub mod activity;
pub mod config;
