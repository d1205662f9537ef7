//! C++ front end for hierscan
//!
//! This crate parses C++ headers with tree-sitter-cpp and exposes an owned
//! declaration tree (classes, structs, class templates, namespaces, base
//! specifiers, constructors and their parameters) through the
//! [`DeclarationNode`](hierscan_api::DeclarationNode) trait.
//!
//! # Example
//!
//! ```rust
//! use hierscan_api::FrontEnd;
//! use hierscan_cpp::CppFrontEnd;
//! use std::path::Path;
//!
//! let front_end = CppFrontEnd::new();
//!
//! let source = r#"
//!     class Generator : public ColProc {
//!     public:
//!         Generator(int x);
//!     };
//! "#;
//!
//! let unit = front_end.parse_source(source, Path::new("generator.h"), &[]).unwrap();
//! println!("Found {} top-level declarations", unit.top_level().len());
//! ```

mod abstractness;
mod decl;
mod extractor;
mod includes;
mod parser_impl;
mod visitor;

pub use decl::CppDecl;
pub use extractor::MAX_INCLUDE_DEPTH;
pub use includes::{resolve_include, IncludeDirective};
pub use parser_impl::CppFrontEnd;
