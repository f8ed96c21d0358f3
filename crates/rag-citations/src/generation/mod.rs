//! Answer generation via the hosted model and citation handling

pub mod answer;
pub mod citation;
pub mod request;

pub use answer::answer_submission;
pub use citation::resolve_citations;
pub use request::{PreparedRequest, RequestBuilder};
