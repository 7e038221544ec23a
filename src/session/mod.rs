pub mod manager;
pub mod state;

pub use manager::{SessionGuard, SessionStore};
pub use state::ApiFuzzState;
