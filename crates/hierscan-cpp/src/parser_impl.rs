//! Implementation of the FrontEnd trait for C++

use hierscan_api::{FrontEnd, ParseOptions, ScanResult, TranslationUnit};
use std::path::{Path, PathBuf};

use crate::decl::CppDecl;
use crate::extractor;

/// C++ header front end backed by tree-sitter-cpp
#[derive(Debug, Clone, Default)]
pub struct CppFrontEnd {
    options: ParseOptions,
}

impl CppFrontEnd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl FrontEnd for CppFrontEnd {
    type Node = CppDecl;

    fn language(&self) -> &str {
        "cpp"
    }

    fn options(&self) -> &ParseOptions {
        &self.options
    }

    fn parse_source(
        &self,
        source: &str,
        file_path: &Path,
        include_paths: &[PathBuf],
    ) -> ScanResult<TranslationUnit<CppDecl>> {
        extractor::extract(source, file_path, include_paths, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierscan_api::{DeclarationNode, ScanError};

    #[test]
    fn test_language() {
        let front_end = CppFrontEnd::new();
        assert_eq!(front_end.language(), "cpp");
    }

    #[test]
    fn test_default_options() {
        let front_end = CppFrontEnd::new();
        assert!(front_end.options().incomplete);
        assert!(front_end.options().skip_function_bodies);
        assert!(front_end.options().follow_includes);
    }

    #[test]
    fn test_parse_source() {
        let front_end = CppFrontEnd::new();
        let unit = front_end
            .parse_source("struct Point { int x; };", Path::new("point.h"), &[])
            .unwrap();

        assert_eq!(unit.file_path, PathBuf::from("point.h"));
        assert_eq!(unit.top_level().len(), 1);
        assert_eq!(unit.top_level()[0].display_name(), "Point");
    }

    #[test]
    fn test_parse_missing_file() {
        let front_end = CppFrontEnd::new();
        let result = front_end.parse(Path::new("/nonexistent/missing.h"), &[]);
        assert!(matches!(result, Err(ScanError::IoError(..))));
    }
}
