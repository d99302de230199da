pub mod document;
pub mod operation;
pub mod schema;

pub use document::{Components, Document, Info};
pub use operation::{MediaType, Operation, Parameter, ParameterLocation, RequestBody, Response};
pub use schema::Schema;
