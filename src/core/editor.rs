//! Validated field mutation on a single course record. Every successful
//! mutation persists immediately; a failure mid-sequence leaves earlier
//! edits applied.

use crate::core::store::CurriculumStore;
use crate::domain::model::CourseRecord;
use crate::domain::ports::Storage;
use crate::utils::error::{CurriculumError, Result};
use crate::utils::validation;

pub const GRADE_MIN: f32 = 0.0;
pub const GRADE_MAX: f32 = 99.0;

/// Outcome of a confirmation-gated edit. The caller owns all prompting; the
/// engine only reports that confirmation is still needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Updated,
    NeedsConfirmation,
}

impl<S: Storage> CurriculumStore<S> {
    /// Records a grade on a course. A value of zero clears the recorded
    /// grade back to ungraded; a nonzero value records it and clears the
    /// enrolled flag. Overwriting an existing grade requires `confirm`.
    pub fn edit_grade(&mut self, code: &str, value: f32, confirm: bool) -> Result<EditOutcome> {
        let index = self
            .find_course(code)
            .ok_or_else(|| CurriculumError::CourseNotFound(code.to_string()))?;

        if !(GRADE_MIN..=GRADE_MAX).contains(&value) {
            return Err(CurriculumError::InvalidGrade {
                value,
                min: GRADE_MIN,
                max: GRADE_MAX,
            });
        }

        if self.courses[index].grade.is_some() && !confirm {
            return Ok(EditOutcome::NeedsConfirmation);
        }

        self.ensure_prerequisites(code)?;

        let course = &mut self.courses[index];
        if value > 0.0 {
            course.grade = Some(value);
            course.enrolled = false;
        } else {
            course.grade = None;
        }

        self.persist()?;
        tracing::info!("Recorded grade {} for {}", value, code);
        Ok(EditOutcome::Updated)
    }

    pub fn edit_unit(&mut self, code: &str, value: f32) -> Result<()> {
        let index = self
            .find_course(code)
            .ok_or_else(|| CurriculumError::CourseNotFound(code.to_string()))?;

        if value <= 0.0 {
            return Err(CurriculumError::InvalidUnit {
                value,
                reason: "Units must be greater than zero".to_string(),
            });
        }

        self.ensure_prerequisites(code)?;

        let course = &mut self.courses[index];
        course.units = value;
        course.enrolled = false;

        self.persist()
    }

    pub fn edit_name(&mut self, code: &str, value: &str) -> Result<()> {
        let index = self
            .find_course(code)
            .ok_or_else(|| CurriculumError::CourseNotFound(code.to_string()))?;

        validation::validate_non_empty_string("title", value)?;
        self.ensure_prerequisites(code)?;

        self.courses[index].title = value.trim().to_string();
        self.persist()
    }

    /// Removes a course record. When `code` also names an elective, the
    /// elective is returned to the selectable pool first.
    pub fn remove_course(&mut self, code: &str, confirm: bool) -> Result<EditOutcome> {
        if !confirm {
            return Ok(EditOutcome::NeedsConfirmation);
        }

        let index = self
            .find_course(code)
            .ok_or_else(|| CurriculumError::CourseNotFound(code.to_string()))?;

        if let Some(elective_index) = self.find_elective(code) {
            let elective = &mut self.electives[elective_index];
            elective.selected = false;
            elective.eligible = true;
            elective.year = None;
        }

        let removed = self.courses.remove(index);
        self.persist()?;
        tracing::info!("Removed course {}", removed.code);
        Ok(EditOutcome::Updated)
    }

    /// Adds a course taken outside the bootstrapped plan. When a record
    /// with the code already exists and is currently enrolled, the grade is
    /// recorded onto it instead of inserting a duplicate.
    pub fn add_course(
        &mut self,
        year: u8,
        term: u8,
        code: &str,
        title: &str,
        units: f32,
        value: f32,
    ) -> Result<()> {
        validation::validate_range("year", year, 1, 4)?;
        validation::validate_range("term", term, 1, 3)?;
        validation::validate_non_empty_string("code", code)?;
        validation::validate_non_empty_string("title", title)?;

        if units <= 0.0 {
            return Err(CurriculumError::InvalidUnit {
                value: units,
                reason: "Units must be greater than zero".to_string(),
            });
        }
        if !(GRADE_MIN..=GRADE_MAX).contains(&value) {
            return Err(CurriculumError::InvalidGrade {
                value,
                min: GRADE_MIN,
                max: GRADE_MAX,
            });
        }

        let grade = if value > 0.0 { Some(value) } else { None };

        match self.find_course(code) {
            Some(index) if self.courses[index].enrolled => {
                let course = &mut self.courses[index];
                course.grade = grade;
                course.enrolled = false;
            }
            _ => {
                self.insert_ordered(CourseRecord {
                    year,
                    term,
                    code: code.trim().to_string(),
                    title: title.trim().to_string(),
                    units,
                    grade,
                    enrolled: false,
                });
            }
        }

        self.persist()
    }
}
