//! Checklist orchestration.

pub mod checker;
pub mod summary;

pub use checker::Checker;
pub use summary::{flatten_details, title_case};
