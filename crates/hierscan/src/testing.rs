//! In-memory declaration trees for unit tests

use hierscan_api::{DeclKind, DeclarationNode};

#[derive(Debug, Clone)]
pub struct TestNode {
    kind: DeclKind,
    name: String,
    is_abstract: bool,
    children: Vec<TestNode>,
    parameters: Vec<TestNode>,
    tokens: Vec<String>,
}

impl TestNode {
    fn new(kind: DeclKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            is_abstract: false,
            children: Vec::new(),
            parameters: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Class with the given base specifier display names
    pub fn class(name: &str, bases: &[&str]) -> Self {
        let mut node = Self::new(DeclKind::ClassDecl, name);
        node.children = bases
            .iter()
            .map(|b| Self::new(DeclKind::BaseSpecifier, b))
            .collect();
        node
    }

    pub fn of_kind(kind: DeclKind, name: &str) -> Self {
        Self::new(kind, name)
    }

    pub fn abstract_class(name: &str, bases: &[&str]) -> Self {
        Self {
            is_abstract: true,
            ..Self::class(name, bases)
        }
    }

    /// Constructor whose parameters are `(name, space-separated tokens)` pairs
    pub fn with_constructor(mut self, params: &[(&str, &str)]) -> Self {
        let mut ctor = Self::new(DeclKind::Constructor, &self.name);
        ctor.parameters = params
            .iter()
            .map(|(name, tokens)| {
                let mut param = Self::new(DeclKind::Parameter, name);
                param.tokens = tokens.split_whitespace().map(str::to_string).collect();
                param
            })
            .collect();
        self.children.push(ctor);
        self
    }
}

impl DeclarationNode for TestNode {
    fn kind(&self) -> DeclKind {
        self.kind
    }

    fn display_name(&self) -> &str {
        &self.name
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
