use serde::{Deserialize, Serialize};

use super::course::{Course, Term};

/// Derived summary statistics. Always recomputed from the buckets after
/// a mutation, never set directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub total_credits: f64,
    pub advanced_credits: f64,
    pub is_valid: bool,
}

/// A student's degree plan: selected courses partitioned over the three
/// terms, plus derived metadata. Mutations go through `engine` and
/// always produce a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub term7: Vec<Course>,
    #[serde(default)]
    pub term8: Vec<Course>,
    #[serde(default)]
    pub term9: Vec<Course>,
    #[serde(default)]
    pub metadata: ProfileMetadata,
}

impl Profile {
    pub fn bucket(&self, term: Term) -> &[Course] {
        match term {
            Term::Term7 => &self.term7,
            Term::Term8 => &self.term8,
            Term::Term9 => &self.term9,
        }
    }

    pub(crate) fn bucket_mut(&mut self, term: Term) -> &mut Vec<Course> {
        match term {
            Term::Term7 => &mut self.term7,
            Term::Term8 => &mut self.term8,
            Term::Term9 => &mut self.term9,
        }
    }

    /// All selected courses with the term bucket they sit in.
    pub fn courses(&self) -> impl Iterator<Item = (Term, &Course)> + '_ {
        Term::ALL
            .into_iter()
            .flat_map(move |term| self.bucket(term).iter().map(move |course| (term, course)))
    }

    pub fn contains_course(&self, code: &str) -> bool {
        self.courses().any(|(_, course)| course.code == code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfileRequest {
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCourseRequest {
    pub code: String,
    pub term: Term,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCourseRequest {
    pub from: Term,
    pub to: Term,
}
