//! System abstraction for environment, filesystem and terminal operations
//!
//! This module provides a unified trait for all external system interactions,
//! allowing for easy testing with mock implementations. The terminal side of
//! the trait is what the interactive prompt resolvers run against.

use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Unified trait for system operations (environment + filesystem + terminal)
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::env`, `std::fs` and stdio
/// - `MockSystem`: Test implementation using in-memory storage and scripted input
pub trait System: Send + Sync {
    // ==================== Environment Operations ====================

    /// Get an environment variable
    fn env_var(&self, key: &str) -> Result<String, VarError>;

    /// Get the current working directory
    fn current_dir(&self) -> io::Result<PathBuf>;

    // ==================== Filesystem Operations ====================

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write bytes to a file, creating it if it doesn't exist
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Recursively create a directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    // ==================== Terminal Operations ====================

    /// Print one line to the operator
    fn show(&self, line: &str);

    /// Read one line of operator input, after printing `prompt` on the same line
    ///
    /// Returns the line without its trailing newline. End of input is an
    /// error, never an empty read; the prompt retry loops rely on this to
    /// terminate when no operator is attached.
    fn read_line(&self, prompt: &str) -> io::Result<String>;

    /// Read one line of operator input without echoing it to the terminal
    fn read_secret(&self, prompt: &str) -> io::Result<String>;
}
