//! Elective enrollment: eligibility recomputation, quota enforcement, and
//! course record creation. All checks run before any mutation, so an enroll
//! call is all-or-nothing as a unit.

use crate::core::prereq;
use crate::core::store::CurriculumStore;
use crate::domain::model::{CourseRecord, ElectiveRecord};
use crate::domain::ports::Storage;
use crate::utils::error::{CurriculumError, Result};
use crate::utils::validation;

/// Selected electives allowed per program year.
fn elective_limit(year: u8) -> usize {
    match year {
        3 => 2,
        _ => 3,
    }
}

impl<S: Storage> CurriculumStore<S> {
    /// All electives with their `eligible` flag recomputed against the
    /// current course list. Electives whose prerequisites have regressed
    /// come back ineligible.
    pub fn list_electives(&mut self) -> &[ElectiveRecord] {
        let courses = &self.courses;
        let prerequisites = &self.prerequisites;
        for elective in &mut self.electives {
            elective.eligible = prereq::satisfied(courses, prerequisites, &elective.code);
        }
        &self.electives
    }

    /// Enrolls an elective for a (year, term) slot, inserting its course
    /// record (and a lab companion when the elective carries lab units).
    pub fn enroll(&mut self, code: &str, year: u8, term: u8) -> Result<()> {
        let index = self
            .find_elective(code)
            .ok_or_else(|| CurriculumError::ElectiveNotFound(code.to_string()))?;

        let elective_code = self.electives[index].code.clone();
        match prereq::first_unmet(&self.courses, &self.prerequisites, &elective_code) {
            Some(prerequisite) => {
                self.electives[index].eligible = false;
                return Err(CurriculumError::PrerequisiteUnmet {
                    code: elective_code,
                    prerequisite,
                });
            }
            None => self.electives[index].eligible = true,
        }

        validation::validate_range("year", year, 3, 4)?;
        validation::validate_range("term", term, 1, 3)?;

        let limit = elective_limit(year);
        let selected_in_year = self
            .electives
            .iter()
            .filter(|e| e.selected && e.year == Some(year))
            .count();
        if selected_in_year >= limit {
            return Err(CurriculumError::QuotaExceeded { year, limit });
        }

        if self.electives[index].selected {
            return Err(CurriculumError::AlreadyTaken(elective_code));
        }

        let (title, units, has_lab) = {
            let elective = &mut self.electives[index];
            elective.selected = true;
            elective.year = Some(year);
            (elective.title.clone(), elective.units, elective.has_lab())
        };

        self.insert_ordered(CourseRecord {
            year,
            term,
            code: elective_code.clone(),
            title: title.clone(),
            units,
            grade: None,
            enrolled: false,
        });

        if has_lab {
            self.insert_ordered(CourseRecord {
                year,
                term,
                code: format!("{}L", elective_code),
                title: format!("{} (LAB)", title),
                units,
                grade: None,
                enrolled: false,
            });
        }

        self.persist()?;
        tracing::info!("Enrolled elective {} for year {} term {}", elective_code, year, term);
        Ok(())
    }
}
