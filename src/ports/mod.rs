//! Port traits defining external boundaries.
//!
//! The linter touches the outside world only to read the Taskfile.
//! Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::FileSystem;
