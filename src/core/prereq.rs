//! Prerequisite evaluation: pure functions over the course list and the
//! prerequisite map, evaluated against the latest store state on every call.

use crate::core::catalog::PrerequisiteMap;
use crate::domain::model::{normalize_code, CourseRecord};

/// A course with no entry (or an empty entry) in the map is trivially
/// satisfied. Otherwise every listed prerequisite must exist in the course
/// list with a recorded grade; any recorded value counts regardless of
/// pass/fail threshold.
pub fn satisfied(courses: &[CourseRecord], prerequisites: &PrerequisiteMap, code: &str) -> bool {
    first_unmet(courses, prerequisites, code).is_none()
}

/// The first prerequisite of `code` that is not yet satisfied, if any.
/// Stops at the first unmet entry.
pub fn first_unmet(
    courses: &[CourseRecord],
    prerequisites: &PrerequisiteMap,
    code: &str,
) -> Option<String> {
    let required = prerequisites.get(&normalize_code(code))?;
    required
        .iter()
        .find(|req| !has_recorded_grade(courses, req))
        .cloned()
}

fn has_recorded_grade(courses: &[CourseRecord], code: &str) -> bool {
    courses
        .iter()
        .any(|c| c.matches_code(code) && c.grade.is_some())
}
