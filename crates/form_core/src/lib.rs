//! Dynamic form core: field validation rules and the form session controller.

pub mod controller;
pub mod reducer;
pub mod validation;
pub mod view;

pub use controller::{FormController, SubmissionHandler};
pub use reducer::{FormOptions, RevalidateOnChange};
pub use validation::{coerce_number, validate, validate_all, Coerced, RuleFailure};
pub use view::{FieldView, Widget};
