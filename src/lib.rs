pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::LocalStorage;
pub use crate::config::EngineConfig;
pub use crate::core::editor::EditOutcome;
pub use crate::core::store::CurriculumStore;
pub use crate::domain::model::{CourseRecord, ElectiveRecord, Program, Snapshot, Standing};
pub use crate::utils::error::{CurriculumError, Result};
