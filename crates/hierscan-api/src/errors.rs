use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a header tree
#[derive(Error, Debug)]
pub enum ScanError {
    /// Input directory is missing or unreadable
    #[error("Cannot read input directory {0}: {1}")]
    InputDirectory(PathBuf, #[source] std::io::Error),

    /// Input path exists but is not a directory
    #[error("Input path {0} is not a directory")]
    NotADirectory(PathBuf),

    /// Hierarchy discovery needs at least one seed name
    #[error("At least one root class name is required")]
    NoRootClasses,

    /// Failed to read file
    #[error("IO error reading {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    /// File too large
    #[error("File {0} exceeds maximum size ({1} bytes)")]
    FileTooLarge(PathBuf, usize),

    /// Syntax error in a header (strict parsing only)
    #[error("Syntax error in {0}:{1}:{2}: {3}")]
    SyntaxError(PathBuf, usize, usize, String),

    /// Front end could not produce a tree at all
    #[error("Parse error in {0}: {1}")]
    ParseError(PathBuf, String),

    /// Writing the class description failed
    #[error("Failed to write output: {0}")]
    Output(String),
}

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;
