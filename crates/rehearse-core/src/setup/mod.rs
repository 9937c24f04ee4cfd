//! Interview setup domain module.
//!
//! - `model`: setup parameters, interview type, and the step-wise draft
//! - `catalog`: built-in domains and suggested roles

mod catalog;
mod model;

pub use catalog::{DomainCatalog, DomainEntry};
pub use model::{InterviewType, SetupDraft, SetupParameters};
