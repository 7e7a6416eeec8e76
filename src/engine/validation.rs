use std::collections::HashSet;

use serde::Serialize;

use crate::models::{CourseLevel, Profile};

/// Credit total a finished profile is expected to reach.
pub const TARGET_TOTAL_CREDITS: f64 = 90.0;
/// Minimum advanced-level credits for a valid degree.
pub const MIN_ADVANCED_CREDITS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileValidation {
    pub is_valid: bool,
    pub total_credits: f64,
    pub advanced_credits: f64,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Recompute credit sums and structural errors from a profile snapshot.
///
/// Errors (duplicate course, course sitting in a term it is not offered
/// in) make the profile invalid. Missed credit targets are warnings
/// only and never affect `is_valid`.
pub fn validate_profile(profile: &Profile) -> ProfileValidation {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut total_credits = 0.0;
    let mut advanced_credits = 0.0;

    for (term, course) in profile.courses() {
        if !seen.insert(course.code.as_str()) {
            errors.push(format!("{} appears more than once in the profile", course.code));
        }
        if !course.terms.contains(&term) {
            errors.push(format!(
                "{} is placed in term {} but is not offered there",
                course.code, term
            ));
        }
        total_credits += course.credits;
        if course.level == CourseLevel::Advanced {
            advanced_credits += course.credits;
        }
    }

    if advanced_credits < MIN_ADVANCED_CREDITS {
        warnings.push(format!(
            "profile has {} advanced credits, at least {} are required",
            advanced_credits, MIN_ADVANCED_CREDITS
        ));
    }
    if (total_credits - TARGET_TOTAL_CREDITS).abs() > 1e-9 {
        warnings.push(format!(
            "profile has {} credits, the target is {}",
            total_credits, TARGET_TOTAL_CREDITS
        ));
    }

    ProfileValidation {
        is_valid: errors.is_empty(),
        total_credits,
        advanced_credits,
        errors,
        warnings,
    }
}
