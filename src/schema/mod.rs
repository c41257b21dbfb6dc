//! Schema system - record validation and HTML templates

pub mod template;
pub mod validator;

pub use template::{TemplateError, TemplateGenerator};
pub use validator::{SchemaError, ValidationError, Validator};
