//! `#include` bookkeeping and header lookup

use std::path::{Path, PathBuf};

/// An `#include` directive seen at top level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Text between the quotes or angle brackets
    pub target: String,

    /// `<...>` form
    pub is_system: bool,

    /// 1-indexed line of the directive
    pub line: usize,

    /// Number of top-level declarations that precede the directive
    pub position: usize,
}

/// Locate the header an include directive refers to
///
/// Quoted includes are tried next to the including file first, then on the
/// search path; angle includes only use the search path.
pub fn resolve_include(
    directive: &IncludeDirective,
    including_file: &Path,
    include_paths: &[PathBuf],
) -> Option<PathBuf> {
    if !directive.is_system {
        if let Some(dir) = including_file.parent() {
            let candidate = dir.join(&directive.target);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    include_paths
        .iter()
        .map(|dir| dir.join(&directive.target))
        .find(|candidate| candidate.is_file())
}

/// Identity used to splice a header at most once per translation unit
pub fn header_identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn directive(target: &str, is_system: bool) -> IncludeDirective {
        IncludeDirective {
            target: target.to_string(),
            is_system,
            line: 1,
            position: 0,
        }
    }

    #[test]
    fn test_quoted_include_prefers_sibling() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("inc")).unwrap();
        fs::write(dir.path().join("base.h"), "class Base {};").unwrap();
        fs::write(dir.path().join("inc/base.h"), "class Other {};").unwrap();

        let resolved = resolve_include(
            &directive("base.h", false),
            &dir.path().join("derived.h"),
            &[dir.path().join("inc")],
        );
        assert_eq!(resolved, Some(dir.path().join("base.h")));
    }

    #[test]
    fn test_quoted_include_falls_back_to_search_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("inc/colproc")).unwrap();
        fs::write(dir.path().join("inc/colproc/colproc.h"), "class ColProc {};").unwrap();

        let resolved = resolve_include(
            &directive("colproc/colproc.h", false),
            &dir.path().join("src/mixer.h"),
            &[dir.path().join("inc")],
        );
        assert_eq!(resolved, Some(dir.path().join("inc/colproc/colproc.h")));
    }

    #[test]
    fn test_system_include_skips_sibling() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("vector"), "").unwrap();

        let resolved = resolve_include(
            &directive("vector", true),
            &dir.path().join("a.h"),
            &[],
        );
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_unresolved_include() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_include(
            &directive("missing.h", false),
            &dir.path().join("a.h"),
            &[dir.path().to_path_buf()],
        );
        assert!(resolved.is_none());
    }
}
