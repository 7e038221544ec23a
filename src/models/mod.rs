pub mod api;
pub mod finding;
pub mod input;
pub mod notification;
pub mod report;

pub use api::*;
pub use finding::*;
pub use input::*;
pub use notification::*;
pub use report::*;
pub use test::*;
