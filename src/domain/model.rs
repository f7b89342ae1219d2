use crate::utils::error::CurriculumError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two supported program tracks. Each carries a fixed subject prefix
/// used when course codes are remapped during a program shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    Bsit,
    Bscs,
}

impl Program {
    /// The other track of the pair.
    pub fn partner(self) -> Program {
        match self {
            Program::Bsit => Program::Bscs,
            Program::Bscs => Program::Bsit,
        }
    }

    pub fn code_prefix(self) -> &'static str {
        match self {
            Program::Bsit => "IT",
            Program::Bscs => "CS",
        }
    }

    /// Lowercase slug used in catalog resource and snapshot names.
    pub fn slug(self) -> &'static str {
        match self {
            Program::Bsit => "bsit",
            Program::Bscs => "bscs",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Program::Bsit => "BSIT",
            Program::Bscs => "BSCS",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Program {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bsit" => Ok(Program::Bsit),
            "bscs" => Ok(Program::Bscs),
            other => Err(CurriculumError::ProgramUnavailable(other.to_string())),
        }
    }
}

/// Canonical form of a course code: lowercase with all whitespace removed.
/// Course identity is compared in this form everywhere.
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// One scheduled or completed course in a student's transcript.
///
/// `grade` is `None` until a grade has been recorded; a recorded grade is
/// always greater than zero. `enrolled == true` implies `grade == None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub year: u8,
    pub term: u8,
    pub code: String,
    pub title: String,
    pub units: f32,
    pub grade: Option<f32>,
    pub enrolled: bool,
}

impl CourseRecord {
    pub fn matches_code(&self, code: &str) -> bool {
        normalize_code(&self.code) == normalize_code(code)
    }

    pub fn standing(&self) -> Standing {
        match self.grade {
            None => Standing::NotTaken,
            Some(g) if g >= 75.0 => Standing::Passing,
            Some(_) => Standing::Failing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Passing,
    Failing,
    NotTaken,
}

/// A catalog elective with its selection state. `eligible` is recomputed
/// from prerequisites on every read and is never trusted from storage.
/// `year` is the program year recorded at enrollment, used for quota
/// accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectiveRecord {
    pub code: String,
    pub title: String,
    pub units: f32,
    pub lab_units: f32,
    pub selected: bool,
    pub eligible: bool,
    pub year: Option<u8>,
}

impl ElectiveRecord {
    pub fn matches_code(&self, code: &str) -> bool {
        normalize_code(&self.code) == normalize_code(code)
    }

    pub fn has_lab(&self) -> bool {
        self.lab_units > 0.0
    }
}

pub const SNAPSHOT_VERSION: u32 = 1;

/// The complete serialized state of one store under one (student, program)
/// key. Tagged with a schema version so the format can evolve without
/// breaking old snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub student_id: String,
    pub program: Program,
    pub saved_at: DateTime<Utc>,
    pub courses: Vec<CourseRecord>,
    pub electives: Vec<ElectiveRecord>,
}
