//! Class hierarchy scanner for C++ headers
//!
//! Finds every class that derives, at any depth, from a set of root classes
//! and describes its constructors for a serialization code generator.
//!
//! # Example
//!
//! ```rust,no_run
//! use hierscan::{to_json, ScanConfig, Scanner};
//! use std::path::Path;
//!
//! let scanner = Scanner::cpp(ScanConfig::default());
//! let report = scanner
//!     .scan(Path::new("include"), &["ColProc".to_string()])
//!     .unwrap();
//!
//! println!("{}", to_json(&report.records).unwrap());
//! ```

pub mod constructors;
pub mod discovery;
pub mod emit;
pub mod hierarchy;
pub mod scanner;

#[cfg(test)]
mod testing;

pub use constructors::constructors_of;
pub use discovery::discover_headers;
pub use emit::{to_json, to_record, write_json};
pub use hierarchy::{
    concrete_only, filter_by_kind, immediate_base_names, transitive_subclasses, unique_by_name,
};
pub use scanner::{ScanReport, Scanner};

// Re-export the shared API so callers need a single dependency
pub use hierscan_api::{
    ClassRecord, ConstructorSignature, DeclKind, DeclarationNode, Diagnostic, FrontEnd,
    ParameterDescriptor, ParseOptions, ScanConfig, ScanError, ScanMetrics, ScanResult, Severity,
    TranslationUnit,
};
pub use hierscan_cpp::{CppDecl, CppFrontEnd};
