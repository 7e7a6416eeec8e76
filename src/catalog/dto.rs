use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Course, CourseLevel, Pace, Period, Term};

#[derive(Debug, Deserialize)]
pub struct CourseListResponse {
    pub results: Vec<RawCourse>,
}

/// A course record as the catalog source delivers it: every field
/// optional or stringly typed. Converted into the strict `Course` at
/// this boundary; nothing downstream sees a raw record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCourse {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credits: Option<f64>,
    pub level: Option<String>,
    #[serde(default)]
    pub semester: Vec<String>,
    #[serde(default)]
    pub period: Vec<String>,
    #[serde(default)]
    pub block: Vec<String>,
    pub pace: Option<String>,
    #[serde(default)]
    pub examination: Vec<String>,
    pub campus: Option<String>,
    #[serde(default)]
    pub programs: Vec<String>,
    pub note: Option<String>,
}

impl RawCourse {
    pub fn into_course(self) -> Result<Course, AppError> {
        let code = self
            .code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::BadRequest("course record has no code".to_string()))?;
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest(format!("course {} has no name", code)))?;
        let credits = self
            .credits
            .filter(|c| *c > 0.0)
            .ok_or_else(|| AppError::BadRequest(format!("course {} has no credit value", code)))?;

        let level = match self.level.as_deref() {
            Some("basic") | Some("grundnivå") => CourseLevel::Basic,
            Some("advanced") | Some("avancerad nivå") => CourseLevel::Advanced,
            other => {
                return Err(AppError::BadRequest(format!(
                    "course {} has unknown level {:?}",
                    code, other
                )));
            }
        };

        let terms = parse_numbers::<Term>(&self.semester)
            .map_err(|e| AppError::BadRequest(format!("course {}: {}", code, e)))?;
        if terms.is_empty() {
            return Err(AppError::BadRequest(format!("course {} has no terms", code)));
        }

        let periods = parse_numbers::<Period>(&self.period)
            .map_err(|e| AppError::BadRequest(format!("course {}: {}", code, e)))?;
        if periods.is_empty() {
            return Err(AppError::BadRequest(format!("course {} has no periods", code)));
        }

        let mut blocks = Vec::new();
        for raw in &self.block {
            let block: u8 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::BadRequest(format!("course {} has block {:?}", code, raw)))?;
            if !(1..=4).contains(&block) {
                return Err(AppError::BadRequest(format!(
                    "course {} has block {} outside 1-4",
                    code, block
                )));
            }
            blocks.push(block);
        }

        let pace = match self.pace.as_deref() {
            Some("half") | Some("50%") => Pace::Half,
            Some("full") | Some("100%") | None => Pace::Full,
            Some(other) => {
                return Err(AppError::BadRequest(format!(
                    "course {} has unknown pace {:?}",
                    code, other
                )));
            }
        };

        // Half-pace block lists are read positionally per period.
        if pace == Pace::Half && blocks.len() != periods.len() {
            return Err(AppError::BadRequest(format!(
                "half-pace course {} has {} blocks for {} periods",
                code,
                blocks.len(),
                periods.len()
            )));
        }

        Ok(Course {
            code,
            name,
            credits,
            level,
            terms,
            periods,
            blocks,
            pace,
            examinations: self.examination,
            campus: self.campus.unwrap_or_default(),
            programs: self.programs,
            note: self.note.filter(|n| !n.is_empty()),
        })
    }
}

fn parse_numbers<T: TryFrom<u8, Error = String>>(raw: &[String]) -> Result<Vec<T>, String> {
    let mut values = Vec::new();
    for entry in raw {
        let number: u8 = entry
            .trim()
            .parse()
            .map_err(|_| format!("{:?} is not a number", entry))?;
        values.push(T::try_from(number)?);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawCourse {
        RawCourse {
            code: Some("TSBK02".to_string()),
            name: Some("Image and Audio Coding".to_string()),
            credits: Some(7.5),
            level: Some("advanced".to_string()),
            semester: vec!["7".to_string(), "9".to_string()],
            period: vec!["1".to_string()],
            block: vec!["2".to_string()],
            pace: Some("full".to_string()),
            examination: vec!["TEN1".to_string(), "LAB1".to_string()],
            campus: Some("Valla".to_string()),
            programs: vec!["D".to_string(), "Y".to_string()],
            note: None,
        }
    }

    #[test]
    fn valid_record_parses_into_a_strict_course() {
        let course = raw().into_course().expect("parse");
        assert_eq!(course.code, "TSBK02");
        assert_eq!(course.credits, 7.5);
        assert_eq!(course.level, CourseLevel::Advanced);
        assert_eq!(course.terms, vec![Term::Term7, Term::Term9]);
        assert_eq!(course.periods, vec![Period::One]);
        assert_eq!(course.blocks, vec![2]);
        assert_eq!(course.pace, Pace::Full);
    }

    #[test]
    fn swedish_level_names_are_accepted() {
        let mut record = raw();
        record.level = Some("avancerad nivå".to_string());
        assert_eq!(record.into_course().expect("parse").level, CourseLevel::Advanced);

        let mut record = raw();
        record.level = Some("grundnivå".to_string());
        assert_eq!(record.into_course().expect("parse").level, CourseLevel::Basic);
    }

    #[test]
    fn percent_pace_notation_is_accepted() {
        let mut record = raw();
        record.pace = Some("50%".to_string());
        record.period = vec!["1".to_string(), "2".to_string()];
        record.block = vec!["2".to_string(), "3".to_string()];
        assert_eq!(record.into_course().expect("parse").pace, Pace::Half);
    }

    #[test]
    fn record_without_code_is_rejected() {
        let mut record = raw();
        record.code = None;
        assert!(record.into_course().is_err());

        let mut record = raw();
        record.code = Some(String::new());
        assert!(record.into_course().is_err());
    }

    #[test]
    fn record_with_bad_term_is_rejected() {
        let mut record = raw();
        record.semester = vec!["5".to_string()];
        assert!(record.into_course().is_err());
    }

    #[test]
    fn half_pace_needs_one_block_per_period() {
        let mut record = raw();
        record.pace = Some("half".to_string());
        record.period = vec!["1".to_string(), "2".to_string()];
        record.block = vec!["2".to_string()];
        assert!(record.into_course().is_err());
    }

    #[test]
    fn out_of_range_block_is_rejected() {
        let mut record = raw();
        record.block = vec!["5".to_string()];
        assert!(record.into_course().is_err());
    }

    #[test]
    fn empty_note_becomes_none() {
        let mut record = raw();
        record.note = Some(String::new());
        assert_eq!(record.into_course().expect("parse").note, None);
    }
}
