pub mod apidoc;
pub mod config;
pub mod convert;
pub mod error;
pub mod openapi;

pub use convert::{convert, to_output_json};
