//! Batch pipeline: enumerate, parse, discover, deduplicate, emit
//!
//! Every header is parsed into its own translation unit and searched
//! independently, seeded with the same root names. The per-file results are
//! concatenated in enumeration order before the global passes run, so the
//! first header to declare a class decides its record.

use hierscan_api::{
    ClassRecord, DeclKind, Diagnostic, FrontEnd, ScanConfig, ScanError, ScanMetrics, ScanResult,
    Severity, TranslationUnit,
};
use hierscan_cpp::CppFrontEnd;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::discovery::discover_headers;
use crate::emit::to_record;
use crate::hierarchy::{concrete_only, filter_by_kind, transitive_subclasses, unique_by_name};

/// Everything a scan produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Records in first-seen order
    pub records: Vec<ClassRecord>,

    pub metrics: ScanMetrics,

    /// Front-end diagnostics from every parsed header
    pub diagnostics: Vec<Diagnostic>,

    /// Headers that produced no tree, with the reason
    pub failed_files: Vec<(PathBuf, String)>,
}

/// Outcome of parsing a single header
struct ParsedHeader<N> {
    path: PathBuf,
    elapsed: Duration,
    unit: ScanResult<TranslationUnit<N>>,
}

/// Finds concrete classes deriving from a set of root classes
pub struct Scanner<F: FrontEnd> {
    front_end: F,
    config: ScanConfig,
    root_label: String,
}

impl Scanner<CppFrontEnd> {
    /// Scanner backed by the tree-sitter C++ front end
    pub fn cpp(config: ScanConfig) -> Self {
        let front_end = CppFrontEnd::with_options(config.parse.clone());
        Self::new(front_end, config)
    }
}

impl<F: FrontEnd> Scanner<F> {
    pub fn new(front_end: F, config: ScanConfig) -> Self {
        Self {
            front_end,
            config,
            root_label: String::new(),
        }
    }

    /// Label written to every record's `rootClass`
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    /// Scan every header under `input`
    ///
    /// # Errors
    /// Fails before any parsing when `root_classes` is empty or `input` is
    /// not a readable directory. Per-header problems are reported in the
    /// returned [`ScanReport`] instead.
    pub fn scan(&self, input: &Path, root_classes: &[String]) -> ScanResult<ScanReport> {
        if root_classes.is_empty() {
            return Err(ScanError::NoRootClasses);
        }

        let metadata =
            fs::metadata(input).map_err(|e| ScanError::InputDirectory(input.to_path_buf(), e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(input.to_path_buf()));
        }

        let headers = discover_headers(input, &self.config.header_extensions);
        debug!(
            "found {} headers under {} ({} parser)",
            headers.len(),
            input.display(),
            self.front_end.language()
        );

        self.scan_files(&headers, root_classes)
    }

    /// Scan an explicit list of headers, in the given order
    pub fn scan_files(&self, headers: &[PathBuf], root_classes: &[String]) -> ScanResult<ScanReport> {
        if root_classes.is_empty() {
            return Err(ScanError::NoRootClasses);
        }

        let parsed: Vec<ParsedHeader<F::Node>> = if self.config.parallel {
            headers.par_iter().map(|path| self.parse_header(path)).collect()
        } else {
            headers.iter().map(|path| self.parse_header(path)).collect()
        };

        let mut report = ScanReport::default();
        let mut units = Vec::with_capacity(parsed.len());

        for header in parsed {
            let mut file_metrics = ScanMetrics {
                files_attempted: 1,
                total_parse_time: header.elapsed,
                ..ScanMetrics::default()
            };

            match header.unit {
                Ok(unit) => {
                    file_metrics.files_parsed = 1;
                    if !unit.diagnostics.is_empty() {
                        file_metrics.files_with_diagnostics = 1;
                    }
                    for diagnostic in &unit.diagnostics {
                        warn!("{diagnostic}");
                    }
                    report.diagnostics.extend(unit.diagnostics.iter().cloned());
                    units.push(unit);
                }
                Err(e) => {
                    warn!("skipping {}: {e}", header.path.display());
                    file_metrics.files_failed = 1;
                    report.failed_files.push((header.path, e.to_string()));
                }
            }

            report.metrics.merge(&file_metrics);
        }

        let mut admitted = Vec::new();
        for unit in &units {
            let candidates = filter_by_kind(unit.top_level(), &DeclKind::CLASS_LIKE);
            let found = transitive_subclasses(&candidates, root_classes);
            debug!(
                "{}: {} candidates, {} admitted{}",
                unit.file_path.display(),
                candidates.len(),
                found.len(),
                if unit.is_partial() { " (partial parse)" } else { "" }
            );

            report.metrics.candidates_seen += candidates.len();
            report.metrics.classes_admitted += found.len();
            admitted.extend(found);
        }

        report.records = concrete_only(unique_by_name(admitted))
            .into_iter()
            .map(|class| to_record(class, &self.root_label))
            .collect();
        report.metrics.records_emitted = report.records.len();

        let errors = report
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        info!(
            "scanned {} headers ({} failed, {} with {} syntax errors) in {:?}; {} classes admitted, {} records emitted",
            report.metrics.files_attempted,
            report.metrics.files_failed,
            report.metrics.files_with_diagnostics,
            errors,
            report.metrics.total_parse_time,
            report.metrics.classes_admitted,
            report.metrics.records_emitted
        );

        Ok(report)
    }

    fn parse_header(&self, path: &Path) -> ParsedHeader<F::Node> {
        let start = Instant::now();
        let unit = self.read_and_parse(path);
        debug!("parsed {} in {:?}", path.display(), start.elapsed());

        ParsedHeader {
            path: path.to_path_buf(),
            elapsed: start.elapsed(),
            unit,
        }
    }

    fn read_and_parse(&self, path: &Path) -> ScanResult<TranslationUnit<F::Node>> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::IoError(path.to_path_buf(), e))?;
        if metadata.len() as usize > self.config.max_file_size {
            return Err(ScanError::FileTooLarge(
                path.to_path_buf(),
                metadata.len() as usize,
            ));
        }

        self.front_end.parse(path, &self.config.include_paths)
    }
}
