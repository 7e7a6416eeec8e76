use chrono::Utc;
use uuid::Uuid;

use super::PlanError;
use super::validation::validate_profile;
use crate::models::{Course, Profile, ProfileMetadata, Term};

/// Create an empty profile with fresh identity and timestamps.
pub fn new_profile(name: &str, owner: Option<String>) -> Profile {
    let now = Utc::now().to_rfc3339();
    let mut profile = Profile {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        owner,
        created_at: now.clone(),
        updated_at: now,
        term7: Vec::new(),
        term8: Vec::new(),
        term9: Vec::new(),
        metadata: ProfileMetadata::default(),
    };
    refresh(&mut profile);
    profile
}

/// Add a catalog course to one term bucket.
///
/// Rejects a code already anywhere in the profile and a term the course
/// is not offered in. The stored copy has its term set pinned to the
/// chosen term.
pub fn add_course(profile: &Profile, course: &Course, term: Term) -> Result<Profile, PlanError> {
    if profile.contains_course(&course.code) {
        return Err(PlanError::DuplicateCourse(course.code.clone()));
    }
    if !course.terms.contains(&term) {
        return Err(PlanError::TermMismatch {
            code: course.code.clone(),
            term,
        });
    }

    let mut next = profile.clone();
    let mut placed = course.clone();
    placed.terms = vec![term];
    next.bucket_mut(term).push(placed);
    refresh(&mut next);
    Ok(next)
}

/// Remove a course from whichever bucket holds it.
pub fn remove_course(profile: &Profile, code: &str) -> Result<Profile, PlanError> {
    let term = profile
        .courses()
        .find(|(_, course)| course.code == code)
        .map(|(term, _)| term)
        .ok_or_else(|| PlanError::CourseNotFound(code.to_string()))?;

    let mut next = profile.clone();
    next.bucket_mut(term).retain(|course| course.code != code);
    refresh(&mut next);
    Ok(next)
}

/// Relocate a course between two term buckets.
///
/// The destination is not checked against the catalog's offered terms;
/// the stored term set is re-pinned to the destination instead.
pub fn move_course(profile: &Profile, code: &str, from: Term, to: Term) -> Result<Profile, PlanError> {
    let mut next = profile.clone();

    let position = next
        .bucket(from)
        .iter()
        .position(|course| course.code == code)
        .ok_or_else(|| PlanError::CourseNotFound(code.to_string()))?;

    let mut moved = next.bucket_mut(from).remove(position);
    moved.terms = vec![to];
    next.bucket_mut(to).push(moved);
    refresh(&mut next);
    Ok(next)
}

/// Empty one term bucket.
pub fn clear_term(profile: &Profile, term: Term) -> Profile {
    let mut next = profile.clone();
    next.bucket_mut(term).clear();
    refresh(&mut next);
    next
}

/// Empty all buckets, keeping identity, name and creation time.
pub fn clear_profile(profile: &Profile) -> Profile {
    let mut next = profile.clone();
    next.term7.clear();
    next.term8.clear();
    next.term9.clear();
    refresh(&mut next);
    next
}

fn refresh(profile: &mut Profile) {
    let validation = validate_profile(profile);
    profile.metadata = ProfileMetadata {
        total_credits: validation.total_credits,
        advanced_credits: validation.advanced_credits,
        is_valid: validation.is_valid,
    };
    profile.updated_at = Utc::now().to_rfc3339();
}
