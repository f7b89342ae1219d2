//! Catalog loading: parses the static program reference files into typed
//! rows. Consulted when a store bootstraps and to refresh the prerequisite
//! map on open.

use crate::domain::model::{normalize_code, Program};
use crate::domain::ports::Storage;
use crate::utils::error::{CurriculumError, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct CourseRow {
    pub year: u8,
    pub term: u8,
    pub code: String,
    pub title: String,
    pub units: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElectiveRow {
    pub code: String,
    pub title: String,
    pub units: f32,
    pub lab_units: f32,
    pub selected: bool,
    pub can_be_taken: bool,
}

/// Normalized course code mapped to its normalized prerequisite codes.
pub type PrerequisiteMap = HashMap<String, Vec<String>>;

const COURSE_FIELDS: usize = 5;
const ELECTIVE_FIELDS: usize = 6;

pub struct CatalogLoader<'a, S: Storage> {
    storage: &'a S,
    catalog_dir: &'a str,
}

impl<'a, S: Storage> CatalogLoader<'a, S> {
    pub fn new(storage: &'a S, catalog_dir: &'a str) -> Self {
        Self {
            storage,
            catalog_dir,
        }
    }

    pub fn courses_path(&self, program: Program) -> String {
        format!("{}/{}_courses.csv", self.catalog_dir, program.slug())
    }

    pub fn electives_path(&self, program: Program) -> String {
        format!("{}/{}_electives.csv", self.catalog_dir, program.slug())
    }

    pub fn prerequisites_path(&self, program: Program) -> String {
        format!("{}/{}_prerequisites.csv", self.catalog_dir, program.slug())
    }

    /// Ordered course rows for the program. The courses resource is the one
    /// that defines whether a program exists at all.
    pub fn load_courses(&self, program: Program) -> Result<Vec<CourseRow>> {
        let path = self.courses_path(program);
        if !self.storage.file_exists(&path) {
            return Err(CurriculumError::CatalogNotFound {
                program: program.to_string(),
                path,
            });
        }

        let data = self.storage.read_file(&path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let line = i + 1;
            let record = result.map_err(|e| malformed(&path, line, e.to_string()))?;
            if record.len() != COURSE_FIELDS {
                return Err(malformed(
                    &path,
                    line,
                    format!("Expected {} fields, got {}", COURSE_FIELDS, record.len()),
                ));
            }

            let row: CourseRow = record
                .deserialize(None)
                .map_err(|e| malformed(&path, line, e.to_string()))?;

            if !(1..=4).contains(&row.year) {
                return Err(malformed(&path, line, format!("Year out of range: {}", row.year)));
            }
            if !(1..=3).contains(&row.term) {
                return Err(malformed(&path, line, format!("Term out of range: {}", row.term)));
            }

            rows.push(row);
        }

        tracing::debug!("Loaded {} course rows from {}", rows.len(), path);
        Ok(rows)
    }

    /// Elective rows for the program. A program without an electives
    /// resource simply offers none.
    pub fn load_electives(&self, program: Program) -> Result<Vec<ElectiveRow>> {
        let path = self.electives_path(program);
        if !self.storage.file_exists(&path) {
            return Ok(Vec::new());
        }

        let data = self.storage.read_file(&path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let line = i + 1;
            let record = result.map_err(|e| malformed(&path, line, e.to_string()))?;
            if record.len() != ELECTIVE_FIELDS {
                return Err(malformed(
                    &path,
                    line,
                    format!("Expected {} fields, got {}", ELECTIVE_FIELDS, record.len()),
                ));
            }

            let row: ElectiveRow = record
                .deserialize(None)
                .map_err(|e| malformed(&path, line, e.to_string()))?;
            rows.push(row);
        }

        tracing::debug!("Loaded {} elective rows from {}", rows.len(), path);
        Ok(rows)
    }

    /// Prerequisite map for the program: `code,prereq1,prereq2,...` per
    /// line, zero or more prerequisites. Codes are normalized on load.
    pub fn load_prerequisites(&self, program: Program) -> Result<PrerequisiteMap> {
        let path = self.prerequisites_path(program);
        if !self.storage.file_exists(&path) {
            return Ok(PrerequisiteMap::new());
        }

        let data = self.storage.read_file(&path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data.as_slice());

        let mut map = PrerequisiteMap::new();
        for (i, result) in reader.records().enumerate() {
            let line = i + 1;
            let record = result.map_err(|e| malformed(&path, line, e.to_string()))?;

            let code = record
                .get(0)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| malformed(&path, line, "Missing course code".to_string()))?;

            let prerequisites = record
                .iter()
                .skip(1)
                .filter(|p| !p.is_empty())
                .map(normalize_code)
                .collect();

            map.insert(normalize_code(code), prerequisites);
        }

        tracing::debug!("Loaded prerequisites for {} courses from {}", map.len(), path);
        Ok(map)
    }
}

fn malformed(file: &str, line: usize, reason: String) -> CurriculumError {
    CurriculumError::MalformedCatalogRow {
        file: file.to_string(),
        line,
        reason,
    }
}
