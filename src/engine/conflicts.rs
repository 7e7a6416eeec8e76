use std::collections::HashSet;

use crate::models::{Course, Profile};

/// Lead-in phrases used by the catalog's restriction notes. Both
/// locales follow the same "<phrase>: CODE, CODE" template.
const CONFLICT_LEADINS: [&str; 2] = [
    "The course may not be included in a degree together with",
    "Kursen får inte ingå i examen tillsammans med",
];

/// Best-effort extraction of mutually-exclusive course codes from a
/// restriction note. Anything that does not match a known template
/// yields an empty set; a note is never a parse error.
pub fn extract_conflict_codes(note: Option<&str>) -> Vec<String> {
    let Some(note) = note else {
        return Vec::new();
    };

    for leadin in CONFLICT_LEADINS {
        let Some(index) = note.find(leadin) else {
            continue;
        };
        let rest = note[index + leadin.len()..].trim_start();
        let Some(codes) = rest.strip_prefix(':') else {
            continue;
        };
        return codes
            .split(',')
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect();
    }

    Vec::new()
}

/// Every already-selected course that cannot be combined with the
/// candidate, checked from both sides: the candidate's note may name
/// the selected course, or the selected course's note may name the
/// candidate. De-duplicated by code, first occurrence wins.
pub fn find_course_conflicts(candidate: &Course, profile: &Profile) -> Vec<Course> {
    let candidate_codes = extract_conflict_codes(candidate.note.as_deref());
    let mut seen: HashSet<String> = HashSet::new();
    let mut conflicts = Vec::new();

    for (_, selected) in profile.courses() {
        let forward = candidate_codes.iter().any(|code| *code == selected.code);
        let backward = extract_conflict_codes(selected.note.as_deref())
            .iter()
            .any(|code| *code == candidate.code);

        if (forward || backward) && seen.insert(selected.code.clone()) {
            conflicts.push(selected.clone());
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mutations::{add_course, new_profile};
    use crate::models::{CourseLevel, Pace, Period, Term};

    fn course(code: &str, note: Option<&str>) -> Course {
        Course {
            code: code.to_string(),
            name: format!("Course {}", code),
            credits: 7.5,
            level: CourseLevel::Advanced,
            terms: vec![Term::Term7],
            periods: vec![Period::One],
            blocks: vec![1],
            pace: Pace::Full,
            examinations: vec!["TEN1".to_string()],
            campus: "Valla".to_string(),
            programs: vec!["D".to_string()],
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn extracts_codes_from_the_english_template() {
        let codes = extract_conflict_codes(Some(
            "The course may not be included in a degree together with: TSBK02, TSBK35",
        ));
        assert_eq!(codes, vec!["TSBK02", "TSBK35"]);
    }

    #[test]
    fn extracts_codes_from_the_swedish_template() {
        let codes = extract_conflict_codes(Some(
            "Kursen får inte ingå i examen tillsammans med: TSBK02",
        ));
        assert_eq!(codes, vec!["TSBK02"]);
    }

    #[test]
    fn missing_note_yields_no_codes() {
        assert!(extract_conflict_codes(None).is_empty());
    }

    #[test]
    fn unrecognized_phrasing_fails_open() {
        assert!(extract_conflict_codes(Some("Only for exchange students")).is_empty());
        assert!(extract_conflict_codes(Some("May not be combined with TSBK02")).is_empty());
    }

    #[test]
    fn empty_and_padded_entries_are_dropped() {
        let codes = extract_conflict_codes(Some(
            "The course may not be included in a degree together with:  TSBK02 , , TSBK35 ",
        ));
        assert_eq!(codes, vec!["TSBK02", "TSBK35"]);
    }

    #[test]
    fn conflict_named_by_the_candidate_is_found() {
        let selected = course("TSBK35", None);
        let profile = add_course(&new_profile("Plan", None), &selected, Term::Term7).expect("add");

        let candidate = course(
            "TSBK02",
            Some("The course may not be included in a degree together with: TSBK35"),
        );
        let conflicts = find_course_conflicts(&candidate, &profile);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].code, "TSBK35");
    }

    #[test]
    fn conflict_named_by_the_selected_course_is_found() {
        // The note sits on the selected course, not on the candidate.
        let selected = course(
            "TSBK02",
            Some("The course may not be included in a degree together with: TSBK35"),
        );
        let profile = add_course(&new_profile("Plan", None), &selected, Term::Term7).expect("add");

        let candidate = course("TSBK35", None);
        let conflicts = find_course_conflicts(&candidate, &profile);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].code, "TSBK02");
    }

    #[test]
    fn conflicts_are_deduplicated_by_code() {
        let selected = course(
            "TSBK02",
            Some("Kursen får inte ingå i examen tillsammans med: TSBK35"),
        );
        let profile = add_course(&new_profile("Plan", None), &selected, Term::Term7).expect("add");

        // Named from both sides; still one entry.
        let candidate = course(
            "TSBK35",
            Some("The course may not be included in a degree together with: TSBK02"),
        );
        let conflicts = find_course_conflicts(&candidate, &profile);
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn unrelated_courses_do_not_conflict() {
        let selected = course("TATA24", None);
        let profile = add_course(&new_profile("Plan", None), &selected, Term::Term7).expect("add");

        let candidate = course(
            "TSBK02",
            Some("The course may not be included in a degree together with: TSBK35"),
        );
        assert!(find_course_conflicts(&candidate, &profile).is_empty());
    }
}
