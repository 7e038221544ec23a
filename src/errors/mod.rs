pub mod types;
pub mod classification;

pub use types::FuzzgateError;
pub use classification::ErrorKind;
