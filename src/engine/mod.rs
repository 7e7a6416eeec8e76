pub mod conflicts;
pub mod mutations;
pub mod schedule;
pub mod validation;

use thiserror::Error;

use crate::models::Term;

/// Structural plan errors. These are raised straight to the caller and
/// never leave the profile snapshot mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("course {0} is already in the profile")]
    DuplicateCourse(String),

    #[error("course {code} is not offered in term {term}")]
    TermMismatch { code: String, term: Term },

    #[error("course {0} is not in the profile")]
    CourseNotFound(String),
}

pub use conflicts::{extract_conflict_codes, find_course_conflicts};
pub use mutations::{add_course, clear_profile, clear_term, move_course, new_profile, remove_course};
pub use schedule::{BlockConflict, find_schedule_conflicts};
pub use validation::{MIN_ADVANCED_CREDITS, ProfileValidation, TARGET_TOTAL_CREDITS, validate_profile};
