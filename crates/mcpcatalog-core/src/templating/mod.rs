//! Parameter templating
//!
//! Turns a raw transport template into a declared parameter list
//! ([`extract_parameters`]) and later fills user-supplied values back into
//! the template ([`substitute_parameters`]). Both operations are pure and
//! share the placeholder conventions in [`placeholder`].

mod error;
mod extract;
pub mod placeholder;
mod substitute;

pub use error::TemplateError;
pub use extract::extract_parameters;
pub use substitute::substitute_parameters;
