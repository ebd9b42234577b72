//! Filesystem port for reading the Taskfile.

use std::path::Path;

/// Provides read access to files.
///
/// The loader goes through this trait so it can be exercised against an
/// in-memory filesystem.
pub trait FileSystem {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
