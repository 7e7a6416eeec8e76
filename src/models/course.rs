use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three master-level terms of the program plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Term {
    Term7,
    Term8,
    Term9,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::Term7, Term::Term8, Term::Term9];

    pub fn number(self) -> u8 {
        match self {
            Term::Term7 => 7,
            Term::Term8 => 8,
            Term::Term9 => 9,
        }
    }
}

impl TryFrom<u8> for Term {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            7 => Ok(Term::Term7),
            8 => Ok(Term::Term8),
            9 => Ok(Term::Term9),
            other => Err(format!("term must be 7, 8 or 9, got {}", other)),
        }
    }
}

impl From<Term> for u8 {
    fn from(term: Term) -> u8 {
        term.number()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Half of a term. A full-pace course runs in one period, a half-pace
/// course spans both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Period {
    One,
    Two,
}

impl Period {
    pub fn number(self) -> u8 {
        match self {
            Period::One => 1,
            Period::Two => 2,
        }
    }
}

impl TryFrom<u8> for Period {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Period::One),
            2 => Ok(Period::Two),
            other => Err(format!("period must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> u8 {
        period.number()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Basic,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Full,
    Half,
}

/// A catalog course. Validated at the catalog boundary; inside the
/// engine these are read-only.
///
/// For a half-pace course `blocks` is paired positionally with
/// `periods` (one block per period it spans). For a full-pace course
/// every listed block applies to every period it is offered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub credits: f64,
    pub level: CourseLevel,
    pub terms: Vec<Term>,
    pub periods: Vec<Period>,
    #[serde(default)]
    pub blocks: Vec<u8>,
    pub pace: Pace,
    #[serde(default)]
    pub examinations: Vec<String>,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_accepts_only_the_three_plan_terms() {
        assert_eq!(Term::try_from(7), Ok(Term::Term7));
        assert_eq!(Term::try_from(9), Ok(Term::Term9));
        assert!(Term::try_from(6).is_err());
        assert!(Term::try_from(10).is_err());
    }

    #[test]
    fn term_serializes_as_number() {
        let json = serde_json::to_string(&Term::Term8).expect("serialize");
        assert_eq!(json, "8");
        let term: Term = serde_json::from_str("9").expect("deserialize");
        assert_eq!(term, Term::Term9);
    }

    #[test]
    fn level_and_pace_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&CourseLevel::Advanced).expect("serialize"),
            "\"advanced\""
        );
        assert_eq!(
            serde_json::to_string(&Pace::Half).expect("serialize"),
            "\"half\""
        );
    }
}
