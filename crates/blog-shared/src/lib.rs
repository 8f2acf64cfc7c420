//! # Blog Shared
//!
//! Types shared between the server and whatever renders its pages:
//! submitted forms with their validation rules, page view models and
//! error bodies.

pub mod forms;
pub mod response;
pub mod views;

pub use forms::{FieldErrors, SubmittedForm};
pub use response::ErrorResponse;
