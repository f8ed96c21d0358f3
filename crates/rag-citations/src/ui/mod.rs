//! Presentation layer: the single form page

pub mod form;
pub mod page;

pub use form::Submission;
pub use page::{Block, Page};
