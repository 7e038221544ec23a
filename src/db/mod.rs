pub mod apis;
pub mod connection;
pub mod fuzz_tests;
pub mod notifications;
pub mod schema;

pub use connection::Database;
