pub mod conditional;
pub mod doctype;
pub mod registry;

pub use conditional::Conditional;
pub use doctype::{Doctype, ParseDoctypeError};
pub use registry::DoctypeRegistry;
