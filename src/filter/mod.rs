//! Row filtering and detection calls

mod completeness;
mod presence;

pub use completeness::filter_complete_cases;
pub use presence::{detect_presence, GroupPresence, DEFAULT_MIN_PRESENT};
