use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("No catalog resource for program {program}: {path}")]
    CatalogNotFound { program: String, path: String },

    #[error("Program {0} is not available")]
    ProgramUnavailable(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Elective not found: {0}")]
    ElectiveNotFound(String),

    #[error("Invalid grade {value}: must be between {min} and {max}")]
    InvalidGrade { value: f32, min: f32, max: f32 },

    #[error("Invalid unit value {value}: {reason}")]
    InvalidUnit { value: f32, reason: String },

    #[error("Prerequisite not met for {code}: {prerequisite}")]
    PrerequisiteUnmet { code: String, prerequisite: String },

    #[error("Elective limit reached for year {year}: at most {limit} allowed")]
    QuotaExceeded { year: u8, limit: usize },

    #[error("Elective already taken: {0}")]
    AlreadyTaken(String),

    #[error("Malformed catalog row in {file} line {line}: {reason}")]
    MalformedCatalogRow {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Failed to persist snapshot {path}: {reason}")]
    PersistFailure { path: String, reason: String },

    #[error("Snapshot {path} has version {found}, expected {expected}")]
    SnapshotVersionMismatch {
        path: String,
        found: u32,
        expected: u32,
    },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CurriculumError>;
