//! Owned declaration tree produced by the C++ front end

use hierscan_api::{DeclKind, DeclarationNode};

/// One declaration recovered from a C++ header
///
/// The tree is detached from the tree-sitter `Tree` it was built from, so a
/// translation unit can outlive the parser and cross threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CppDecl {
    pub(crate) kind: DeclKind,
    pub(crate) display_name: String,
    pub(crate) is_abstract: bool,
    pub(crate) children: Vec<CppDecl>,
    pub(crate) parameters: Vec<CppDecl>,
    pub(crate) tokens: Vec<String>,

    /// Bare name without template arguments or qualifiers (class-like nodes)
    pub(crate) spelling: String,
    /// Pure virtual members declared directly in this class
    pub(crate) pure_virtuals: Vec<String>,
    /// Every member function name declared in this class
    pub(crate) methods: Vec<String>,
    /// Class-like node with a body, as opposed to a forward declaration
    pub(crate) is_definition: bool,
}

impl CppDecl {
    pub(crate) fn new(kind: DeclKind, display_name: impl Into<String>) -> Self {
        Self {
            kind,
            display_name: display_name.into(),
            is_abstract: false,
            children: Vec::new(),
            parameters: Vec::new(),
            tokens: Vec::new(),
            spelling: String::new(),
            pure_virtuals: Vec::new(),
            methods: Vec::new(),
            is_definition: false,
        }
    }

    /// Whether this class-like node has a body
    pub fn is_definition(&self) -> bool {
        self.is_definition
    }

    pub(crate) fn has_own_pure_virtual(&self) -> bool {
        !self.pure_virtuals.is_empty()
    }
}

impl DeclarationNode for CppDecl {
    fn kind(&self) -> DeclKind {
        self.kind
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn parameters(&self) -> &[Self] {
        &self.parameters
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
