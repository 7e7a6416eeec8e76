pub mod course;
pub mod profile;

pub use course::{Course, CourseLevel, Pace, Period, Term};
pub use profile::{AddCourseRequest, MoveCourseRequest, NewProfileRequest, Profile, ProfileMetadata};
