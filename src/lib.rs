pub mod accessor;
pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod fuzzer;
pub mod models;
pub mod modules;
pub mod reporting;
pub mod runner;
pub mod session;
