//! Program shift: renames the storage key and remaps course codes between
//! the two program tracks.

use crate::core::store::{snapshot_name, CurriculumStore};
use crate::domain::model::{normalize_code, Program};
use crate::domain::ports::Storage;
use crate::utils::error::Result;

impl<S: Storage> CurriculumStore<S> {
    /// Shifts the store to the other program track. The snapshot is renamed
    /// to the new key (a rename failure is reported and the shift
    /// continues), prefixed course codes are rewritten, and ungraded
    /// records whose code now collides with a graded one are re-marked as
    /// currently enrolled. Persists once at the end.
    pub fn shift_program(&mut self) -> Result<Program> {
        let source = self.program;
        let target = source.partner();

        let old_path = self.snapshot_path();
        let new_path = format!("{}/{}", self.data_dir, snapshot_name(&self.student_id, target));
        if let Err(e) = self.storage.rename_file(&old_path, &new_path) {
            tracing::warn!("Failed to rename snapshot {} to {}: {}", old_path, new_path, e);
        }

        self.program = target;

        let from = source.code_prefix();
        let to = target.code_prefix();
        for course in &mut self.courses {
            if course.code.starts_with(from) {
                course.code = course.code.replacen(from, to, 1);
            }
        }

        // A record is compared against every record but itself: an ungraded
        // record whose code matches a different, graded record is the
        // not-yet-finished retake of that course. Graded records are left
        // alone so the enrolled-implies-ungraded invariant holds.
        for i in 0..self.courses.len() {
            if self.courses[i].grade.is_some() {
                continue;
            }
            let code = normalize_code(&self.courses[i].code);
            let has_graded_counterpart = self
                .courses
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.grade.is_some() && normalize_code(&other.code) == code);
            if has_graded_counterpart {
                self.courses[i].enrolled = true;
            }
        }

        self.persist()?;
        tracing::info!("Shifted program from {} to {}", source, target);
        Ok(target)
    }
}
