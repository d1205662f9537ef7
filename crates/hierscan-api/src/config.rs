use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Front-end parsing switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Keep whatever tree the front end recovered from a header with syntax
    /// errors instead of failing the file
    pub incomplete: bool,

    /// Do not materialize tokens inside function bodies
    pub skip_function_bodies: bool,

    /// Splice the declarations of resolved `#include`s into the translation unit
    pub follow_includes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            incomplete: true,
            skip_function_bodies: true,
            follow_includes: true,
        }
    }
}

/// Configuration for a header scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Header extensions matched during discovery (e.g., [".h"])
    pub header_extensions: Vec<String>,

    /// Search directories handed to the front end
    pub include_paths: Vec<PathBuf>,

    /// Maximum header size to parse (in bytes)
    /// Larger files are reported as failed and skipped
    pub max_file_size: usize,

    /// Parse headers on the rayon pool
    pub parallel: bool,

    /// Front-end switches
    pub parse: ParseOptions,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            header_extensions: vec![".h".to_string()],
            include_paths: Vec::new(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
            parallel: false,
            parse: ParseOptions::default(),
        }
    }
}

impl ScanConfig {
    /// Create config that fails a header on any syntax error
    pub fn strict() -> Self {
        Self {
            parse: ParseOptions {
                incomplete: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create config for fast scanning (parallel, headers parsed in isolation)
    pub fn fast() -> Self {
        Self {
            parallel: true,
            parse: ParseOptions {
                follow_includes: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Enable parallel parsing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set maximum file size
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Add include search directories
    pub fn with_include_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Replace the matched header extensions; a missing leading dot is added
    pub fn with_header_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.header_extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref();
                if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self
    }

    /// Replace the front-end switches
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}
