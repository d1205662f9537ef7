//! Translation unit extraction for C++ headers
//!
//! This module provides two parsing modes:
//! - Incomplete mode: Keeps whatever tree-sitter recovers (default)
//! - Strict mode: Fails on syntax errors in the header being scanned
//!
//! Resolved `#include` directives are spliced into the root so that base
//! classes declared in included headers are visible to the scan.

use hierscan_api::{DeclKind, Diagnostic, ParseOptions, ScanError, ScanResult, TranslationUnit};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

use crate::abstractness::resolve_abstractness;
use crate::decl::CppDecl;
use crate::includes::{header_identity, resolve_include, IncludeDirective};
use crate::visitor::CppVisitor;

/// Deepest include chain followed from one header
pub const MAX_INCLUDE_DEPTH: usize = 64;

/// Declarations and includes recovered from one file
struct ParsedFile {
    decls: Vec<CppDecl>,
    includes: Vec<IncludeDirective>,
    diagnostics: Vec<Diagnostic>,
}

/// Parse one header into a translation unit
pub fn extract(
    source: &str,
    file_path: &Path,
    include_paths: &[PathBuf],
    options: &ParseOptions,
) -> ScanResult<TranslationUnit<CppDecl>> {
    let parsed = parse_file(source, file_path, options)?;

    // In strict mode, fail on errors in the header itself
    if !options.incomplete {
        if let Some(first) = parsed.diagnostics.first() {
            return Err(ScanError::SyntaxError(
                file_path.to_path_buf(),
                first.line,
                first.column,
                format!(
                    "{} ({} error nodes)",
                    first.message,
                    parsed.diagnostics.len()
                ),
            ));
        }
    }

    let mut splicer = IncludeSplicer::new(include_paths, options);
    splicer.visited.insert(header_identity(file_path));
    splicer.diagnostics.extend(parsed.diagnostics.iter().cloned());

    let mut decls = splicer.splice(parsed, file_path, 0);
    resolve_abstractness(&mut decls);

    let mut root = CppDecl::new(DeclKind::Other, file_path.display().to_string());
    root.children = decls;

    let mut unit = TranslationUnit::new(file_path.to_path_buf(), root);
    unit.diagnostics = splicer.diagnostics;
    unit.included_files = splicer.included_files;
    Ok(unit)
}

fn parse_file(source: &str, file_path: &Path, options: &ParseOptions) -> ScanResult<ParsedFile> {
    let mut parser = Parser::new();
    let language = tree_sitter_cpp::language();
    parser
        .set_language(&language)
        .map_err(|e| ScanError::ParseError(file_path.to_path_buf(), e.to_string()))?;

    let tree = parser.parse(source, None).ok_or_else(|| {
        ScanError::ParseError(file_path.to_path_buf(), "Failed to parse".to_string())
    })?;

    let root_node = tree.root_node();
    let mut diagnostics = Vec::new();
    if root_node.has_error() {
        collect_syntax_errors(root_node, source.as_bytes(), file_path, &mut diagnostics);
    }

    // Visit the AST - ERROR nodes are walked for recoverable declarations
    let mut visitor = CppVisitor::new(source.as_bytes(), options);
    visitor.visit_node(root_node);

    Ok(ParsedFile {
        decls: visitor.decls,
        includes: visitor.includes,
        diagnostics,
    })
}

/// Record ERROR and MISSING nodes as diagnostics
fn collect_syntax_errors(node: Node, source: &[u8], file: &Path, out: &mut Vec<Diagnostic>) {
    let position = node.start_position();
    let (line, column) = (position.row + 1, position.column + 1);

    if node.is_missing() {
        out.push(Diagnostic::error(
            file,
            line,
            column,
            format!("expected '{}'", node.kind()),
        ));
        return;
    }

    if node.is_error() {
        let text = node.utf8_text(source).unwrap_or("");
        let near = text.split_whitespace().next().unwrap_or("");
        out.push(Diagnostic::error(
            file,
            line,
            column,
            format!("syntax error near '{near}'"),
        ));
        return;
    }

    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_syntax_errors(child, source, file, out);
    }
}

/// Splices resolved headers into a unit, each at most once
struct IncludeSplicer<'a> {
    include_paths: &'a [PathBuf],
    options: &'a ParseOptions,
    visited: HashSet<PathBuf>,
    diagnostics: Vec<Diagnostic>,
    included_files: Vec<PathBuf>,
}

impl<'a> IncludeSplicer<'a> {
    fn new(include_paths: &'a [PathBuf], options: &'a ParseOptions) -> Self {
        Self {
            include_paths,
            options,
            visited: HashSet::new(),
            diagnostics: Vec::new(),
            included_files: Vec::new(),
        }
    }

    /// Merge a file's declarations with the headers it includes, in source order
    fn splice(&mut self, parsed: ParsedFile, file_path: &Path, depth: usize) -> Vec<CppDecl> {
        if !self.options.follow_includes || parsed.includes.is_empty() {
            return parsed.decls;
        }

        let mut pending = parsed.includes.into_iter().peekable();
        let mut out = Vec::new();

        for (index, decl) in parsed.decls.into_iter().enumerate() {
            while let Some(directive) = pending.next_if(|d| d.position <= index) {
                out.extend(self.expand(&directive, file_path, depth));
            }
            out.push(decl);
        }
        for directive in pending {
            out.extend(self.expand(&directive, file_path, depth));
        }

        out
    }

    fn expand(
        &mut self,
        directive: &IncludeDirective,
        including_file: &Path,
        depth: usize,
    ) -> Vec<CppDecl> {
        let Some(path) = resolve_include(directive, including_file, self.include_paths) else {
            if directive.is_system {
                log::debug!("skipping system header <{}>", directive.target);
            } else {
                self.diagnostics.push(Diagnostic::warning(
                    including_file,
                    directive.line,
                    1,
                    format!("'{}' file not found", directive.target),
                ));
            }
            return Vec::new();
        };

        if !self.visited.insert(header_identity(&path)) {
            return Vec::new();
        }

        if depth + 1 > MAX_INCLUDE_DEPTH {
            self.diagnostics.push(Diagnostic::warning(
                including_file,
                directive.line,
                1,
                format!("#include nested too deeply ({MAX_INCLUDE_DEPTH} levels)"),
            ));
            return Vec::new();
        }

        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                self.diagnostics.push(Diagnostic::warning(
                    including_file,
                    directive.line,
                    1,
                    format!("cannot read '{}': {e}", path.display()),
                ));
                return Vec::new();
            }
        };

        let parsed = match parse_file(&source, &path, self.options) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.diagnostics
                    .push(Diagnostic::warning(including_file, directive.line, 1, e.to_string()));
                return Vec::new();
            }
        };

        log::debug!(
            "splicing {} into {}",
            path.display(),
            including_file.display()
        );
        self.included_files.push(path.clone());
        self.diagnostics.extend(parsed.diagnostics.iter().cloned());
        self.splice(parsed, &path, depth + 1)
    }
}
