use crate::utils::error::Result;

/// Backing storage for catalog resources and snapshots. Paths are relative
/// to whatever root the implementation was constructed with; the engine
/// never derives locations from ambient process state.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn file_exists(&self, path: &str) -> bool;
    fn rename_file(&self, from: &str, to: &str) -> Result<()>;
}
