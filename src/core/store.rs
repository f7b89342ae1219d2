//! The curriculum store: ordered course and elective records for one
//! (student, program) key, bootstrapped from the catalog on first open and
//! reloaded from its snapshot afterwards.

use crate::config::EngineConfig;
use crate::core::catalog::{CatalogLoader, PrerequisiteMap};
use crate::core::prereq;
use crate::domain::model::{
    CourseRecord, ElectiveRecord, Program, Snapshot, SNAPSHOT_VERSION,
};
use crate::domain::ports::Storage;
use crate::utils::error::{CurriculumError, Result};
use chrono::Utc;

#[derive(Debug)]
pub struct CurriculumStore<S: Storage> {
    pub(crate) storage: S,
    pub(crate) data_dir: String,
    pub(crate) student_id: String,
    pub(crate) program: Program,
    pub(crate) courses: Vec<CourseRecord>,
    pub(crate) electives: Vec<ElectiveRecord>,
    pub(crate) prerequisites: PrerequisiteMap,
}

/// Snapshot file name for a (student, program) key: lowercase, spaces
/// stripped, so the same student always maps to the same file.
pub(crate) fn snapshot_name(student_id: &str, program: Program) -> String {
    let id = student_id.to_lowercase().replace(' ', "");
    format!("{}-{}.json", id, program.slug())
}

impl<S: Storage> CurriculumStore<S> {
    /// Opens the store for a (student, program) key. Loads the persisted
    /// snapshot if one exists; otherwise bootstraps from the catalog and
    /// persists immediately so the next open reuses the snapshot.
    pub fn open(
        storage: S,
        config: &EngineConfig,
        student_id: &str,
        program: Program,
    ) -> Result<Self> {
        let snapshot_path = format!("{}/{}", config.data.dir, snapshot_name(student_id, program));

        let loader = CatalogLoader::new(&storage, &config.catalog.dir);
        let prerequisites = loader.load_prerequisites(program)?;

        if storage.file_exists(&snapshot_path) {
            let data = storage.read_file(&snapshot_path)?;
            let snapshot: Snapshot = serde_json::from_slice(&data)?;
            if snapshot.version != SNAPSHOT_VERSION {
                return Err(CurriculumError::SnapshotVersionMismatch {
                    path: snapshot_path,
                    found: snapshot.version,
                    expected: SNAPSHOT_VERSION,
                });
            }

            tracing::debug!(
                "Loaded snapshot {} ({} courses, {} electives)",
                snapshot_path,
                snapshot.courses.len(),
                snapshot.electives.len()
            );

            return Ok(Self {
                storage,
                data_dir: config.data.dir.clone(),
                student_id: student_id.to_string(),
                program,
                courses: snapshot.courses,
                electives: snapshot.electives,
                prerequisites,
            });
        }

        let course_rows = loader.load_courses(program).map_err(|e| match e {
            CurriculumError::CatalogNotFound { .. } => {
                CurriculumError::ProgramUnavailable(program.to_string())
            }
            other => other,
        })?;
        let elective_rows = loader.load_electives(program)?;

        let courses = course_rows
            .into_iter()
            .map(|row| CourseRecord {
                year: row.year,
                term: row.term,
                code: row.code,
                title: row.title,
                units: row.units,
                grade: None,
                enrolled: false,
            })
            .collect();

        let electives = elective_rows
            .into_iter()
            .map(|row| ElectiveRecord {
                code: row.code,
                title: row.title,
                units: row.units,
                lab_units: row.lab_units,
                selected: row.selected,
                eligible: row.can_be_taken,
                year: None,
            })
            .collect();

        let store = Self {
            storage,
            data_dir: config.data.dir.clone(),
            student_id: student_id.to_string(),
            program,
            courses,
            electives,
            prerequisites,
        };

        tracing::info!(
            "Bootstrapped curriculum for {} ({}) from catalog",
            store.student_id,
            store.program
        );
        store.persist()?;
        Ok(store)
    }

    /// Serializes the entire store to its snapshot, overwriting any prior
    /// one. Failures surface to the caller; nothing is swallowed.
    pub fn persist(&self) -> Result<()> {
        let path = self.snapshot_path();
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            student_id: self.student_id.clone(),
            program: self.program,
            saved_at: Utc::now(),
            courses: self.courses.clone(),
            electives: self.electives.clone(),
        };

        let data =
            serde_json::to_vec_pretty(&snapshot).map_err(|e| CurriculumError::PersistFailure {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        self.storage
            .write_file(&path, &data)
            .map_err(|e| CurriculumError::PersistFailure {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Persisted snapshot to {}", path);
        Ok(())
    }

    pub fn snapshot_path(&self) -> String {
        format!(
            "{}/{}",
            self.data_dir,
            snapshot_name(&self.student_id, self.program)
        )
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn program(&self) -> Program {
        self.program
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn electives(&self) -> &[ElectiveRecord] {
        &self.electives
    }

    /// Index of the course matching `code`, compared case- and
    /// whitespace-insensitively. Courses and electives are separate
    /// namespaces.
    pub fn find_course(&self, code: &str) -> Option<usize> {
        self.courses.iter().position(|c| c.matches_code(code))
    }

    pub fn find_elective(&self, code: &str) -> Option<usize> {
        self.electives.iter().position(|e| e.matches_code(code))
    }

    pub fn course(&self, code: &str) -> Option<&CourseRecord> {
        self.find_course(code).map(|i| &self.courses[i])
    }

    /// Inserts before the first existing record sharing the new record's
    /// (year, term); appends when no such group exists. Keeps term blocks
    /// contiguous.
    pub fn insert_ordered(&mut self, record: CourseRecord) {
        let index = self
            .courses
            .iter()
            .position(|c| c.year == record.year && c.term == record.term)
            .unwrap_or(self.courses.len());
        self.courses.insert(index, record);
    }

    pub fn prerequisites_satisfied(&self, code: &str) -> bool {
        prereq::satisfied(&self.courses, &self.prerequisites, code)
    }

    pub(crate) fn ensure_prerequisites(&self, code: &str) -> Result<()> {
        match prereq::first_unmet(&self.courses, &self.prerequisites, code) {
            Some(prerequisite) => Err(CurriculumError::PrerequisiteUnmet {
                code: code.to_string(),
                prerequisite,
            }),
            None => Ok(()),
        }
    }

    /// Mean of the recorded grades in one term block. `None` when the block
    /// has no graded course yet.
    pub fn term_average(&self, year: u8, term: u8) -> Option<f32> {
        let grades: Vec<f32> = self
            .courses
            .iter()
            .filter(|c| c.year == year && c.term == term)
            .filter_map(|c| c.grade)
            .collect();

        if grades.is_empty() {
            None
        } else {
            Some(grades.iter().sum::<f32>() / grades.len() as f32)
        }
    }
}
