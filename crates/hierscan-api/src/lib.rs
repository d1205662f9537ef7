//! hierscan API
//!
//! Shared traits and types between the hierarchy scan and its C++ front ends.
//!
//! This crate defines:
//!
//! - **DeclarationNode trait**: the narrow view of a parsed declaration the scan consumes
//! - **FrontEnd trait**: how a header becomes a [`TranslationUnit`]
//! - **Records**: the JSON shape handed to the serialization code generator
//! - **Configuration**: scan and parse switches
//! - **Metrics**: per-run counters
//! - **Error handling**: [`ScanError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use hierscan_api::{DeclarationNode, FrontEnd, ParseOptions, ScanResult, TranslationUnit};
//! use std::path::{Path, PathBuf};
//!
//! struct MyFrontEnd {
//!     options: ParseOptions,
//! }
//!
//! impl FrontEnd for MyFrontEnd {
//!     type Node = MyNode;
//!
//!     fn language(&self) -> &str {
//!         "cpp"
//!     }
//!
//!     fn options(&self) -> &ParseOptions {
//!         &self.options
//!     }
//!
//!     fn parse_source(&self, source: &str, file_path: &Path, include_paths: &[PathBuf])
//!         -> ScanResult<TranslationUnit<MyNode>> {
//!         todo!()
//!     }
//! }
//! ```

pub mod config;
pub mod errors;
pub mod metrics;
pub mod node;
pub mod records;
pub mod traits;

pub use config::{ParseOptions, ScanConfig};
pub use errors::{ScanError, ScanResult};
pub use metrics::ScanMetrics;
pub use node::{DeclKind, DeclarationNode};
pub use records::{ClassRecord, ConstructorSignature, ParameterDescriptor};
pub use traits::{Diagnostic, FrontEnd, Severity, TranslationUnit};

#[cfg(test)]
mod tests;
