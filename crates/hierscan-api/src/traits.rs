use crate::{config::ParseOptions, errors::ScanResult, node::DeclarationNode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Severity of a front-end diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A problem the front end noticed while building a translation unit
///
/// Diagnostics never stop a scan; the recovered tree is still used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File the problem was found in (may be an included header)
    pub file: PathBuf,

    /// 1-indexed line
    pub line: usize,

    /// 1-indexed column
    pub column: usize,

    pub severity: Severity,

    pub message: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(file, line, column, message)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.file.display(),
            self.line,
            self.column,
            self.severity,
            self.message
        )
    }
}

/// Result of parsing one header
#[derive(Debug, Clone)]
pub struct TranslationUnit<N> {
    /// Header the unit was parsed from
    pub file_path: PathBuf,

    /// Root declaration; its children are the top-level declarations,
    /// including those spliced in from resolved includes
    pub root: N,

    /// Problems noticed while parsing
    pub diagnostics: Vec<Diagnostic>,

    /// Headers that were spliced into this unit, in include order
    pub included_files: Vec<PathBuf>,
}

impl<N: DeclarationNode> TranslationUnit<N> {
    pub fn new(file_path: PathBuf, root: N) -> Self {
        Self {
            file_path,
            root,
            diagnostics: Vec::new(),
            included_files: Vec::new(),
        }
    }

    /// Top-level declarations of the unit
    pub fn top_level(&self) -> &[N] {
        self.root.children()
    }

    /// True when the front end had to recover from errors
    pub fn is_partial(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

/// Core trait that a C++ front-end binding must implement
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so headers can be parsed in parallel.
pub trait FrontEnd: Send + Sync {
    /// Declaration handle this front end produces
    type Node: DeclarationNode + Send;

    /// Returns the language identifier (lowercase, e.g., "cpp")
    fn language(&self) -> &str;

    /// Parsing switches this front end was built with
    fn options(&self) -> &ParseOptions;

    /// Parse source text that is already in memory
    ///
    /// # Arguments
    /// * `source` - Header contents
    /// * `file_path` - Logical path; relative includes resolve against its directory
    /// * `include_paths` - Search directories for `#include`
    ///
    /// # Errors
    /// Returns `ScanError` only when no tree can be produced, or when the
    /// header has syntax errors and incomplete parsing is disabled.
    fn parse_source(
        &self,
        source: &str,
        file_path: &Path,
        include_paths: &[PathBuf],
    ) -> ScanResult<TranslationUnit<Self::Node>>;

    /// Read and parse one header
    ///
    /// Default implementation reads the file and delegates to `parse_source`.
    fn parse(
        &self,
        path: &Path,
        include_paths: &[PathBuf],
    ) -> ScanResult<TranslationUnit<Self::Node>> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| crate::ScanError::IoError(path.to_path_buf(), e))?;
        self.parse_source(&source, path, include_paths)
    }
}
