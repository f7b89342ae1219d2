pub mod catalog;
pub mod editor;
pub mod enrollment;
pub mod prereq;
pub mod shift;
pub mod store;

pub use crate::domain::model::{CourseRecord, ElectiveRecord, Program, Snapshot};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
