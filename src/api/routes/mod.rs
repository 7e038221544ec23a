pub mod apis;
pub mod fuzzing;
pub mod health;
